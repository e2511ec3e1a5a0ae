use plotly::common::Mode;
use plotly::{Layout, Scatter};
use web_sys::HtmlElement;
use yew::prelude::*;

use common::PriceChart as PriceChartData;

use crate::api_client::stocks::get_price_chart;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::components::plot;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
}

#[function_component(PriceChart)]
pub fn price_chart(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let (fetch_state, _refetch) =
        use_fetch_with_refetch(move || get_price_chart(symbol.clone()));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Price History"}</h3>
                <p class="text-sm text-gray-500 mb-4">{"Opening and closing prices over time"}</p>

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
                    FetchState::Success(chart) => html! {
                        <PlotlyPriceChart chart={chart.clone()} />
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlotlyPriceChartProps {
    chart: PriceChartData,
}

#[function_component(PlotlyPriceChart)]
fn plotly_price_chart(props: &PlotlyPriceChartProps) -> Html {
    let container_ref = use_node_ref();
    let chart = props.chart.clone();
    let div_id = format!("price-chart-{}", chart.symbol.to_lowercase().replace('.', "-"));

    use_effect_with(
        (container_ref.clone(), chart, div_id.clone()),
        move |(container_ref, chart, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let dates: Vec<String> = chart.dates.iter().map(|d| d.to_string()).collect();
                let close_dates: Vec<String> =
                    chart.close_dates.iter().map(|d| d.to_string()).collect();

                let open_trace = Scatter::new(dates, chart.open.clone())
                    .mode(Mode::Lines)
                    .name("stock_open")
                    .line(plotly::common::Line::new().color("rgb(59, 130, 246)").width(2.0));
                let close_trace = Scatter::new(close_dates, chart.close.clone())
                    .mode(Mode::Lines)
                    .name("stock_close")
                    .line(plotly::common::Line::new().color("rgb(249, 115, 22)").width(2.0));

                let layout = Layout::new()
                    .title(plotly::common::Title::with_text("Time Series Data"))
                    .x_axis(
                        plotly::layout::Axis::new()
                            .title(plotly::common::Title::with_text("Date"))
                            .range_slider(plotly::layout::RangeSlider::new().visible(true)),
                    )
                    .y_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Price")))
                    .height(400);

                let traces = match (
                    serde_json::to_string(&open_trace),
                    serde_json::to_string(&close_trace),
                ) {
                    (Ok(open), Ok(close)) => vec![open, close],
                    _ => {
                        log::error!("failed to serialize price chart traces");
                        return;
                    }
                };
                plot::draw(div_id, traces, &layout);
            }
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:400px;"></div>
    }
}
