use yew::prelude::*;

use common::converters::format_price;

use crate::api_client::stocks::get_history_tail;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::hooks::FetchState;

const TAIL_ROWS: usize = 5;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
}

/// Raw-data panel: the last rows of the history table as fetched.
#[function_component(HistoryTable)]
pub fn history_table(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let (fetch_state, _refetch) =
        use_fetch_with_refetch(move || get_history_tail(symbol.clone(), TAIL_ROWS));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Raw Data"}</h3>

                {match &*fetch_state {
                    FetchState::Loading => html! {
                        <div class="flex justify-center items-center py-8">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    },
                    FetchState::Error(error) => html! {
                        <div class="alert alert-error">
                            <span>{&error.message}</span>
                        </div>
                    },
                    FetchState::Success(history) => html! {
                        <>
                            <p class="text-sm text-gray-500 mb-2">
                                {format!("Last {} of {} rows", history.bars.len(), history.total_rows)}
                            </p>
                            <table class="table table-zebra table-sm">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Open"}</th>
                                        <th>{"High"}</th>
                                        <th>{"Low"}</th>
                                        <th>{"Close"}</th>
                                        <th>{"Volume"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for history.bars.iter().map(|bar| html! {
                                        <tr>
                                            <td>{bar.date.to_string()}</td>
                                            <td>{format_price(bar.open)}</td>
                                            <td>{format_price(bar.high)}</td>
                                            <td>{format_price(bar.low)}</td>
                                            <td>{bar.close.map(format_price).unwrap_or_else(|| "—".to_string())}</td>
                                            <td>{bar.volume}</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        </>
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}
