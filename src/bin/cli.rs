use clap::Parser;
use gamemap::{Coord, GameMap, MapGenerationParams};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Генератор тайловых карт и отладка поиска пути
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него — параметры по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределяет сид из конфигурации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь для сохранения PNG карты
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Масштаб PNG: сторона тайла в пикселях
    #[arg(long, default_value_t = 8)]
    scale: u32,

    /// Найти путь между двумя тайлами: `x0,y0:x1,y1`
    #[arg(short, long, value_parser = parse_route)]
    path: Option<Route>,

    /// Вывести карту символами в stdout
    #[arg(long)]
    ascii: bool,
}

/// Запрос пути из командной строки
#[derive(Debug, Clone, Copy)]
struct Route {
    start: Coord,
    goal: Coord,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Coord::new(x, y))
}

fn parse_route(s: &str) -> Result<Route, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `x0,y0:x1,y1`, got `{s}`"))?;
    Ok(Route {
        start: parse_coord(from)?,
        goal: parse_coord(to)?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            info!(?path, "Loading configuration");
            MapGenerationParams::from_toml_file(path)?
        }
        None => MapGenerationParams::default(),
    };
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }

    let map = GameMap::from_params(&params)?;

    let info = map.get_map_info();
    println!("{}", serde_json::to_string_pretty(&info)?);

    let route = match cli.path {
        Some(Route { start, goal }) => {
            let path = map.find_path(start, goal);
            match &path {
                Some(path) => info!(
                    ?start,
                    ?goal,
                    steps = path.len(),
                    cost = ?map.path_cost(path),
                    "Path found"
                ),
                None => info!(?start, ?goal, "No path"),
            }
            path
        }
        None => None,
    };

    if cli.ascii {
        print!("{}", map.to_ascii());
    }

    if let Some(output) = &cli.output {
        let output = output.to_string_lossy();
        info!(%output, scale = cli.scale, "Saving map image");
        map.save_as_png(&output, cli.scale, route.as_deref())?;
    }

    Ok(())
}
