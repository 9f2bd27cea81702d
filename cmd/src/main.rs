use std::path::PathBuf;
use std::process::ExitCode;

use gehome_climate::{Climate, ClimateMode};
use structopt::StructOpt;
use thiserror::Error;

use snapshot::{Snapshot, SnapshotError, WriteError};

mod snapshot;

const STATE_ENV: &str = "GEHOME_STATE";
const STATE_FILE: &str = "appliance.toml";

#[derive(StructOpt)]
#[structopt(about = "Drive a GE Home air conditioner snapshot through its climate entity")]
struct Opt {
    /// Appliance snapshot file, defaults to $GEHOME_STATE or ./appliance.toml
    #[structopt(long, parse(from_os_str))]
    state: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(StructOpt)]
enum Cmd {
    /// Print the climate state
    Show,
    /// Set the hvac mode: auto, cool, dry, fan_only or heat
    Mode { mode: ClimateMode },
    /// Set the target temperature for the current mode
    Temperature {
        #[structopt(allow_hyphen_values = true)]
        value: f32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ExitCode> {
    let opt = Opt::from_args();

    gehome_common::init_logging();

    run(opt).await.map_err(|err| {
        log::error!("{err}");
        ExitCode::FAILURE
    })
}

#[derive(Error, Debug)]
enum RunError {
    #[error("locating snapshot: {0}")]
    Locate(#[from] std::io::Error),
    #[error("snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Climate(#[from] gehome_climate::Error<WriteError>),
}

async fn run(opt: Opt) -> Result<(), RunError> {
    let path = match opt.state {
        Some(path) => path,
        None => gehome_common::locate(STATE_ENV, STATE_FILE)?,
    };

    let snapshot = Snapshot::load(&path)?;
    let climate = Climate::new(&snapshot);

    match opt.cmd {
        Cmd::Show => { show(&climate); }
        Cmd::Mode { mode } => { climate.set_hvac_mode(mode).await?; }
        Cmd::Temperature { value } => { climate.set_temperature(value).await?; }
    }

    let writes = snapshot.writes();
    if writes.is_empty() {
        return Ok(());
    }

    for (code, value) in &writes {
        log::info!("wrote erd {code}: {value}");
    }

    snapshot.save(&path)?;
    Ok(())
}

fn show(climate: &Climate<&Snapshot>) {
    let modes = climate.hvac_modes()
        .iter()
        .map(ClimateMode::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    println!("hvac mode:           {}", climate.hvac_mode());
    println!("hvac modes:          {modes}");
    println!("target temperature:  {} (erd {})",
        display_temp(climate.target_temperature()),
        climate.target_temperature_code(),
    );
    println!("current temperature: {}", display_temp(climate.current_temperature()));
}

fn display_temp(temp: Option<f32>) -> String {
    match temp {
        Some(temp) => temp.to_string(),
        None => "unknown".to_owned(),
    }
}
