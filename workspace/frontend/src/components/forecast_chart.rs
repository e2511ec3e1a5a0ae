use plotly::common::{Fill, Mode};
use plotly::{Layout, Scatter};
use web_sys::HtmlElement;
use yew::prelude::*;

use common::ForecastChart as ForecastChartData;

use crate::api_client::stocks::get_forecast_chart;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::components::plot;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
    pub years: u8,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let years = props.years;
    let (fetch_state, _refetch) =
        use_fetch_with_refetch(move || get_forecast_chart(symbol.clone(), years));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{format!("Forecast plot for {} {}", props.years, if props.years == 1 { "year" } else { "years" })}</h3>

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
                        <PlotlyForecastChart chart={chart.clone()} />
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlotlyForecastChartProps {
    chart: ForecastChartData,
}

#[function_component(PlotlyForecastChart)]
fn plotly_forecast_chart(props: &PlotlyForecastChartProps) -> Html {
    let container_ref = use_node_ref();
    let chart = props.chart.clone();
    let div_id = format!(
        "forecast-chart-{}",
        chart.symbol.to_lowercase().replace('.', "-")
    );

    use_effect_with(
        (container_ref.clone(), chart, div_id.clone()),
        move |(container_ref, chart, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let dates: Vec<String> = chart.dates.iter().map(|d| d.to_string()).collect();
                let history_dates: Vec<String> =
                    chart.history_dates.iter().map(|d| d.to_string()).collect();

                // Band: upper bound first, lower bound fills up to it.
                let upper_trace = Scatter::new(dates.clone(), chart.yhat_upper.clone())
                    .mode(Mode::Lines)
                    .name("upper bound")
                    .line(plotly::common::Line::new().color("rgba(59, 130, 246, 0.2)").width(0.0));
                let lower_trace = Scatter::new(dates.clone(), chart.yhat_lower.clone())
                    .mode(Mode::Lines)
                    .name("lower bound")
                    .fill(Fill::ToNextY)
                    .line(plotly::common::Line::new().color("rgba(59, 130, 246, 0.2)").width(0.0));
                let yhat_trace = Scatter::new(dates, chart.yhat.clone())
                    .mode(Mode::Lines)
                    .name("forecast")
                    .line(plotly::common::Line::new().color("rgb(59, 130, 246)").width(2.0));
                let history_trace = Scatter::new(history_dates, chart.history_values.clone())
                    .mode(Mode::Markers)
                    .name("observed")
                    .marker(plotly::common::Marker::new().color("rgb(17, 24, 39)").size(3));

                let layout = Layout::new()
                    .title(plotly::common::Title::with_text("Forecast"))
                    .x_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Date")))
                    .y_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Price")))
                    .height(450);

                let serialized: Result<Vec<String>, _> = [
                    serde_json::to_string(&upper_trace),
                    serde_json::to_string(&lower_trace),
                    serde_json::to_string(&yhat_trace),
                    serde_json::to_string(&history_trace),
                ]
                .into_iter()
                .collect();
                match serialized {
                    Ok(traces) => plot::draw(div_id, traces, &layout),
                    Err(e) => log::error!("failed to serialize forecast traces: {}", e),
                }
            }
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:450px;"></div>
    }
}
