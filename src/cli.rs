use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(short, long, value_name = "FLOAT", help = "Simulation ticks per second", default_value_t = 60.0)]
    pub tick_rate: f64,

    #[arg(short, long, value_name = "FLOAT", help = "Render frames per second", default_value_t = 60.0)]
    pub frame_rate: f64,
}
