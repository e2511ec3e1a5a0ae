use plotly::Layout;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

/// Hand pre-serialized traces and a layout to the global Plotly bundle.
pub fn draw(div_id: &str, trace_json: Vec<String>, layout: &Layout) {
    let data_js = js_sys::Array::new();
    for trace in trace_json {
        match js_sys::JSON::parse(&trace) {
            Ok(trace_js) => {
                data_js.push(&trace_js);
            }
            Err(e) => {
                log::error!("failed to parse trace JSON for {}: {:?}", div_id, e);
                return;
            }
        }
    }

    let layout_json = match serde_json::to_string(layout) {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to serialize layout for {}: {}", div_id, e);
            return;
        }
    };
    match js_sys::JSON::parse(&layout_json) {
        Ok(layout_js) => newPlot(div_id, data_js.into(), layout_js),
        Err(e) => log::error!("failed to parse layout JSON for {}: {:?}", div_id, e),
    }
}
