//! Regex Railroad CLI
//!
//! Usage:
//!   regex-railroad [OPTIONS] [PATTERN]
//!
//! Reads a pattern from the argument or stdin, parses it, and prints the
//! diagram's drawing primitives, either as a readable listing or as JSON
//! for a rendering backend to consume.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use regex_railroad::{
    diagram_with_config, parse, LayoutConfig, PathData, Primitive, RenderConfig, Theme,
};

#[derive(Parser)]
#[command(name = "regex-railroad")]
#[command(about = "Railroad diagrams for regular expressions")]
struct Cli {
    /// Pattern to diagram (reads from stdin if not provided)
    pattern: Option<String>,

    /// Theme file for primitive colors (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the diagram as JSON instead of a listing
    #[arg(short, long)]
    json: bool,

    /// Print the parsed syntax tree instead of a diagram
    #[arg(long)]
    ast: bool,

    /// Show the supported pattern grammar
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no pattern and stdin is a terminal (interactive), show intro help
    if cli.pattern.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let theme = match &cli.theme {
        Some(path) => match Theme::from_file(path) {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Theme::default(),
    };

    let layout_config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading layout config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    let pattern = match &cli.pattern {
        Some(pattern) => pattern.clone(),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer.trim_end_matches('\n').trim_end_matches('\r').to_string(),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if cli.ast {
        match parse(&pattern) {
            Ok(node) => println!("{:#?}", node),
            Err(e) => {
                eprintln!("{}", e.format(&pattern, "<pattern>"));
                std::process::exit(1);
            }
        }
        return;
    }

    let config = RenderConfig::new().with_layout(layout_config).with_theme(theme);
    let diagram = match diagram_with_config(&pattern, config) {
        Ok(diagram) => diagram,
        Err(e) => {
            eprintln!("{}", e.format(&pattern, "<pattern>"));
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&diagram) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing diagram: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "bounds: ({:.1}, {:.1}) .. ({:.1}, {:.1})",
        diagram.bounds.min_x, diagram.bounds.min_y, diagram.bounds.max_x, diagram.bounds.max_y
    );
    for primitive in &diagram.primitives {
        println!("{}", describe(primitive));
    }
}

/// One-line description of a primitive for the listing output.
fn describe(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Box {
            x,
            y,
            width,
            height,
            label,
            ..
        } => format!("box    ({x:.1}, {y:.1}) {width:.1}x{height:.1} \"{label}\""),
        Primitive::TextLabel { x, y, text, .. } => {
            format!("text   ({x:.1}, {y:.1}) \"{text}\"")
        }
        Primitive::Path { data, .. } => match data {
            PathData::Line(points) => {
                let points: Vec<String> = points
                    .iter()
                    .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                    .collect();
                format!("line   {}", points.join(" -> "))
            }
            PathData::Cubic { from, to, .. } => format!(
                "curve  ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                from.x, from.y, to.x, to.y
            ),
        },
        Primitive::Arrowhead { x, y, direction } => {
            format!("arrow  ({x:.1}, {y:.1}) {direction:?}")
        }
        Primitive::DashedFrame {
            x,
            y,
            width,
            height,
            ..
        } => format!("frame  ({x:.1}, {y:.1}) {width:.1}x{height:.1}"),
    }
}

fn print_intro() {
    println!(
        r#"Regex Railroad - railroad diagrams for regular expressions

USAGE:
    regex-railroad [OPTIONS] [PATTERN]
    echo '<pattern>' | regex-railroad

OPTIONS:
    -j, --json       Emit the diagram as JSON
    --ast            Print the parsed syntax tree
    -t, --theme      Custom colors (TOML file)
    -c, --config     Custom layout metrics (TOML file)
    -g, --grammar    Show the supported pattern grammar
    -h, --help       Print help

QUICK START:
    regex-railroad 'colou?r' --json > diagram.json

This parses the pattern and prints the drawing primitives a rendering
backend needs to draw the diagram. Run --grammar for the supported syntax."#
    );
}

fn print_grammar() {
    println!(
        r#"SUPPORTED PATTERN GRAMMAR
=========================

TERMS
-----
a            Literal character
\d \w \n ... Two-character escape (any character may follow the backslash)
.            Any character
^  $         Start / end of line
[a-z0_]      Character class: literals, escapes, and two-endpoint ranges
[^...]       Negated character class

COMPOSITION
-----------
ab           Concatenation
a|b          Alternation, drawn top to bottom in source order

QUANTIFIERS
-----------
a?           Optional (bypass above the line)
a*           Zero or more (bypass plus loop-back below the line)
a+           One or more (loop-back only)
a{{n}} a{{n,m}}  Braced repetition, drawn as a caption, not expanded

GROUPS
------
(x)          Capturing
(?:x)        Non-capturing
(?=x) (?!x)  Lookahead / negative lookahead
(?<=x) (?<!x) Lookbehind / negative lookbehind

NOT SUPPORTED
-------------
Named groups, backreferences, Unicode property escapes, and inline flags
are outside the grammar. Their characters parse as ordinary atoms."#
    );
}
