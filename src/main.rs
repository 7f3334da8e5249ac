use anyhow::Result;
use clap::{Parser, ValueEnum};
use snakorn::app::App;
use snakorn::game::{Difficulty, GameConfig};
use snakorn::score::HighScoreStore;

#[derive(Parser)]
#[command(name = "snakorn")]
#[command(version, about = "Classic Snake arcade game for the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "15")]
    height: usize,

    /// Starting difficulty (also selectable in the options screen)
    #[arg(long, default_value = "normal")]
    difficulty: DifficultyArg,

    /// Where the high score lives
    #[arg(long, default_value = "highscore.json")]
    highscore_file: String,
}

#[derive(Clone, ValueEnum)]
enum DifficultyArg {
    /// 5 ticks per second
    Easy,
    /// 10 ticks per second
    Normal,
    /// 15 ticks per second
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        GameConfig::new(cli.width, cli.height).with_difficulty(cli.difficulty.into());
    let store = HighScoreStore::load(cli.highscore_file);

    let mut app = App::new(config, store);
    app.run().await
}
