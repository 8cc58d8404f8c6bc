use chainlink_renderer::{Config, RenderTheme, render_document};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

const DEFAULT_WIDTH: f32 = 800.0;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainRenderOptions {
    theme: Option<String>,
    width: Option<f32>,
    font_family: Option<String>,
}

fn build_render_inputs(options: ChainRenderOptions) -> Result<(Config, RenderTheme, f32), String> {
    let mut config = Config::default();
    if let Some(theme) = options.theme.as_deref() {
        config.theme = theme.parse()?;
    }
    if let Some(font_family) = options.font_family {
        config.palettes.light.font_family = font_family.clone();
        config.palettes.dark.font_family = font_family;
    }
    let theme = config.theme;
    Ok((config, theme, options.width.unwrap_or(DEFAULT_WIDTH)))
}

#[wasm_bindgen]
pub fn render_chain_svg(nodes_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ChainRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ChainRenderOptions::default()
    };

    let (config, theme, width) =
        build_render_inputs(options).map_err(|error| JsValue::from_str(&error))?;
    render_document(nodes_json, theme, width, &config)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
