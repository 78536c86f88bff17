use std::io::{stdout, Write};

use clap::Parser;
use log::info;
use termion::{color, style};

use utility::*;
use visibility_trie::utils_for_tests::{TileMap, WALL_CHAR};
use visibility_trie::{PrecomputedVisibility, TrieStrategy, VisibilityIndex};

#[derive(Parser)]
#[command(name = "symmetry_playground")]
#[command(about = "Shows what each marked viewpoint on a small walled map can see")]
struct Cli {
    /// Sight radius the trie is built for
    #[arg(short, long, default_value_t = 30)]
    radius: u32,

    /// Which rays the trie is built from
    #[arg(short, long, default_value_t = TrieStrategy::Dense)]
    strategy: TrieStrategy,

    /// Extra viewpoint, as X,Y
    #[arg(long, value_parser = parse_square)]
    origin: Option<WorldSquare>,
}

fn parse_square(text: &str) -> Result<WorldSquare, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {:?}", text))?;
    let parse = |n: &str| {
        n.trim()
            .parse::<i32>()
            .map_err(|e| format!("{:?}: {}", n, e))
    };
    Ok(point2(parse(x)?, parse(y)?))
}

fn print_view(
    out: &mut impl Write,
    map: &TileMap,
    index: &impl VisibilityIndex,
    name: &str,
    origin: WorldSquare,
) -> std::io::Result<()> {
    let visible = index.visible_squares(origin, |square| map.is_blocked(square));
    writeln!(
        out,
        "{}{}Visibility for {}{}",
        style::Bold,
        color::Fg(color::Yellow),
        name,
        style::Reset
    )?;
    for line in map.render_visible(&visible).lines() {
        let colored = line.replace(
            WALL_CHAR,
            &format!("{}{}{}", color::Fg(color::Blue), WALL_CHAR, color::Fg(color::Reset)),
        );
        writeln!(out, "{}", colored)?;
    }
    writeln!(out)
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let index = PrecomputedVisibility::build(cli.radius, cli.strategy);
    info!("{} trie: {:?}", cli.strategy, index.stats());

    let map = TileMap::symmetry_example();
    let mut out = stdout().lock();
    for (label, viewpoint) in map.viewpoints() {
        print_view(&mut out, &map, &index, &label.to_string(), viewpoint)?;
    }
    if let Some(origin) = cli.origin {
        print_view(&mut out, &map, &index, &point_to_string(origin), origin)?;
    }
    out.flush()
}
