use plotly::common::Mode;
use plotly::{Layout, Scatter};
use web_sys::HtmlElement;
use yew::prelude::*;

use common::ComponentSeries;

use crate::api_client::stocks::get_forecast_components;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::components::plot;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
    pub years: u8,
}

/// Decomposition panel: trend, weekly and yearly components of the fit.
#[function_component(ComponentsChart)]
pub fn components_chart(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let years = props.years;
    let (fetch_state, _refetch) =
        use_fetch_with_refetch(move || get_forecast_components(symbol.clone(), years));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Forecast components"}</h3>

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
                    FetchState::Success(components) => html! {
                        <PlotlyComponentsChart components={components.clone()} />
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlotlyComponentsChartProps {
    components: ComponentSeries,
}

#[function_component(PlotlyComponentsChart)]
fn plotly_components_chart(props: &PlotlyComponentsChartProps) -> Html {
    let container_ref = use_node_ref();
    let components = props.components.clone();
    let div_id = format!(
        "components-chart-{}",
        components.symbol.to_lowercase().replace('.', "-")
    );

    use_effect_with(
        (container_ref.clone(), components, div_id.clone()),
        move |(container_ref, components, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let dates: Vec<String> = components.dates.iter().map(|d| d.to_string()).collect();

                let trend_trace = Scatter::new(dates.clone(), components.trend.clone())
                    .mode(Mode::Lines)
                    .name("trend")
                    .line(plotly::common::Line::new().color("rgb(59, 130, 246)").width(2.0));
                let weekly_trace = Scatter::new(dates.clone(), components.weekly.clone())
                    .mode(Mode::Lines)
                    .name("weekly")
                    .line(plotly::common::Line::new().color("rgb(16, 185, 129)").width(1.5));
                let yearly_trace = Scatter::new(dates, components.yearly.clone())
                    .mode(Mode::Lines)
                    .name("yearly")
                    .line(plotly::common::Line::new().color("rgb(249, 115, 22)").width(1.5));

                let layout = Layout::new()
                    .title(plotly::common::Title::with_text("Trend and seasonality"))
                    .x_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Date")))
                    .y_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Contribution")))
                    .height(400);

                let serialized: Result<Vec<String>, _> = [
                    serde_json::to_string(&trend_trace),
                    serde_json::to_string(&weekly_trace),
                    serde_json::to_string(&yearly_trace),
                ]
                .into_iter()
                .collect();
                match serialized {
                    Ok(traces) => plot::draw(div_id, traces, &layout),
                    Err(e) => log::error!("failed to serialize component traces: {}", e),
                }
            }
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:400px;"></div>
    }
}
