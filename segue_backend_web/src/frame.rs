// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and timer waits as futures.
//!
//! Each wait wraps a one-shot browser callback in a `js_sys::Promise` and
//! awaits it through `wasm_bindgen_futures`. Neither wait can fail or be
//! cancelled; a job whose instance has moved on simply resumes as a no-op.

use core::time::Duration;

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use segue_core::frame::Wait;

// Direct global bindings instead of `web_sys::Window` methods. Avoids
// fetching (and unwrapping) the Window object on every wait.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &Function) -> i32;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &Function, ms: i32) -> i32;
}

/// Resolves at the next `requestAnimationFrame` callback.
pub async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        request_animation_frame(&resolve);
    });
    let _ = JsFuture::from(promise).await;
}

/// Resolves after roughly `d`, rounded up to whole milliseconds.
///
/// A zero duration resolves without yielding to the event loop.
pub async fn delay(d: Duration) {
    let ms = i32::try_from(d.as_micros().div_ceil(1000)).unwrap_or(i32::MAX);
    if ms == 0 {
        return;
    }
    let promise = Promise::new(&mut |resolve, _reject| {
        set_timeout(&resolve, ms);
    });
    let _ = JsFuture::from(promise).await;
}

/// Satisfies a [`Wait`] returned by the core.
pub async fn wait(wait: Wait) {
    match wait {
        Wait::NextFrame => next_frame().await,
        Wait::Delay(d) => delay(d).await,
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn delay_waits_at_least_the_duration() {
        let start = performance_now();
        delay(Duration::from_millis(20)).await;
        assert!(performance_now() - start >= 19.0);
    }

    #[wasm_bindgen_test]
    async fn zero_delay_is_immediate() {
        delay(Duration::ZERO).await;
        wait(Wait::NextFrame).await;
    }
}
