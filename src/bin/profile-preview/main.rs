use restaurant_profile::{config::Config, MemoryPage};
use tokio::io::{AsyncBufReadExt, BufReader};

mod commands;

use commands::{Outcome, PreviewAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .with_writer(std::io::stderr)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let mut renderer =
        restaurant_profile::init(&path, &config.source(), MemoryPage::bilingual()).await;
    println!("{}", renderer.mount().to_html());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let args = line.split_whitespace().collect::<Vec<_>>();
        if args.is_empty() {
            continue;
        }

        let action = match PreviewAction::new(&args) {
            Ok(action) => action,
            Err(hint) => {
                eprintln!("{hint}\n\n{}", commands::HELP);
                continue;
            }
        };

        match action.run(&mut renderer) {
            Outcome::Redraw => println!("{}", renderer.mount().to_html()),
            Outcome::Quit => break,
        }
    }

    Ok(())
}
