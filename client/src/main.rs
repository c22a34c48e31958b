mod cli;

use anyhow::Result;
use arena::GreedyArbiter;
use clap::Parser;
use cli::{Cli, Commands};
use common::{ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use model::Checkpoint;
use othello::{Engine, LinearModel};
use self_learn::{LogReporter, SelfLearn, SelfLearnOptions};

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Learn(learn_args) => {
            let config_path = learn_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "self_learn".to_string())?;

            let options: SelfLearnOptions = config.load()?;
            options.validate()?;

            info!("{:?}", options);

            let engine = Engine::new(options.board_size)?;
            let mut model = LinearModel::new(options.board_size);

            if let Some(weights_path) = &options.weights_path {
                model.load_checkpoint(weights_path)?;
            }

            let arbiter = GreedyArbiter::new(&engine);
            let (_, reports) = SelfLearn::new(&engine, &options).learn(
                model,
                &arbiter,
                &mut LogReporter,
            )?;

            let promotions = reports.iter().filter(|r| r.promoted).count();
            info!(
                "Training complete. Promotions: {}/{}, Best model: {:?}, Last trained: {:?}",
                promotions,
                reports.len(),
                options.best_checkpoint_path(),
                options.checkpoint_path
            );
        }
    }

    Ok(())
}
