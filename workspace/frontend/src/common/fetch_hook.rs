use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use crate::api_client::ApiError;
use crate::hooks::FetchState;

/// Fetch on mount, with a callback to refetch on demand.
///
/// The fetch closure is captured once; components that need to refetch
/// when their inputs change remount with a `key` instead.
#[hook]
pub fn use_fetch_with_refetch<T, F, Fut>(
    fetch_fn: F,
) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let fetch_fn = use_state(|| Rc::new(fetch_fn));

    let refetch = {
        let fetch_state = fetch_state.clone();
        let fetch_fn = fetch_fn.clone();

        use_callback((), move |_, _| {
            let fetch_state = fetch_state.clone();
            let fetch_fn = fetch_fn.clone();

            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let fut = (*fetch_fn)();
                match fut.await {
                    Ok(data) => fetch_state.set(FetchState::Success(data)),
                    Err(err) => {
                        log::error!("fetch failed [{}]: {}", err.code, err.message);
                        fetch_state.set(FetchState::Error(err));
                    }
                }
            });
        })
    };

    // Fetch on mount
    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
