use crate::config::{Config, load_config};
use crate::integrity::check_links;
use crate::ir::ChainNode;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::logging::{Verbosity, init_logging};
use crate::parser::{extract_chain_blocks, parse_chain};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::theme::RenderTheme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "chainr",
    version,
    about = "Render a linked chain of records as an SVG/PNG diagram"
)]
pub struct Args {
    /// Input file (.json, .md) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, layout and palette overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Color theme; overrides the config file
    #[arg(short = 't', long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Container width in pixels; defaults to the config's render.width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Warn about nodes whose previousHash does not match their predecessor
    #[arg(long = "check-links")]
    pub check_links: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// More log output (repeat for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for RenderTheme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => RenderTheme::Light,
            ThemeArg::Dark => RenderTheme::Dark,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(Verbosity::from_flags(args.verbose, args.quiet));

    let mut config = load_config(args.config.as_deref())?;
    if let Some(theme) = args.theme {
        config.theme = theme.into();
    }
    let width = container_width(args.width, &mut config);

    let (input, is_markdown) = read_input(args.input.as_deref())?;
    let documents = if is_markdown {
        extract_chain_blocks(&input)
    } else {
        vec![input]
    };

    if documents.is_empty() {
        return Err(anyhow::anyhow!("No chain blocks found in input"));
    }

    let outputs = if documents.len() == 1 {
        vec![args.output.clone()]
    } else {
        resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?
            .into_iter()
            .map(Some)
            .collect()
    };

    for (idx, (document, output)) in documents.iter().zip(outputs).enumerate() {
        let nodes = parse_chain(document)?;
        if args.check_links {
            report_link_breaks(&nodes);
        }
        if let Some(dump_path) = args.dump_layout.as_deref() {
            let dump_path = numbered_path(dump_path, idx, documents.len());
            let layout = compute_layout(&nodes, width, &config.layout);
            write_layout_dump(&dump_path, &layout, &nodes)?;
        }
        render_document(&nodes, &config, width, args.output_format, output.as_deref())?;
    }

    Ok(())
}

/// An explicit `-w` wins over the config file and is kept as the PNG default.
fn container_width(flag: Option<f32>, config: &mut Config) -> f32 {
    if let Some(width) = flag {
        config.render.width = width;
    }
    config.render.width
}

fn render_document(
    nodes: &[ChainNode],
    config: &Config,
    width: f32,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let svg = render_svg(nodes, config.theme, width, config)?;
    match format {
        OutputFormat::Svg => write_output_svg(&svg, output),
        OutputFormat::Png => {
            let output = output
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render)
        }
    }
}

fn report_link_breaks(nodes: &[ChainNode]) {
    let breaks = check_links(nodes);
    if breaks.is_empty() {
        tracing::info!(nodes = nodes.len(), "chain links intact");
    }
    for link_break in breaks {
        tracing::warn!(?link_break, "broken chain link");
    }
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)?;
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| matches!(ext, "md" | "markdown"))
            .unwrap_or(false);
        return Ok((content, is_md));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn numbered_path(base: &Path, idx: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("chain");
    let ext = base.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}-{}.{}", stem, idx + 1, ext))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("chain-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("chain");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn numbers_outputs_next_to_base_file() {
        let outputs =
            resolve_multi_outputs(Some(Path::new("out/ledger.svg")), OutputFormat::Svg, 2).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("out/ledger-1.svg"), PathBuf::from("out/ledger-2.svg")]
        );
        assert!(resolve_multi_outputs(None, OutputFormat::Png, 2).is_err());
    }

    #[test]
    fn single_dump_path_is_kept() {
        assert_eq!(numbered_path(Path::new("dump.json"), 0, 1), PathBuf::from("dump.json"));
        assert_eq!(numbered_path(Path::new("dump.json"), 1, 3), PathBuf::from("dump-2.json"));
    }

    #[test]
    fn width_flag_overrides_config_render_width() {
        let mut config = parse_config(r#"{"render": {"width": 640}}"#).unwrap();
        assert_eq!(container_width(None, &mut config), 640.0);
        assert_eq!(container_width(Some(1024.0), &mut config), 1024.0);
        assert_eq!(config.render.width, 1024.0);
        assert_eq!(container_width(None, &mut Config::default()), 800.0);
    }

    #[test]
    fn parses_flags() {
        let args = Args::parse_from([
            "chainr", "-i", "chain.json", "-t", "dark", "-w", "1024", "--check-links", "-vv",
        ]);
        assert_eq!(args.theme, Some(ThemeArg::Dark));
        assert_eq!(args.width, Some(1024.0));
        assert!(args.check_links);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.output_format, OutputFormat::Svg);
    }
}
