use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use blynclight::config::Settings;
use blynclight::simulator::window;
use blynclight::{
    Blynclight, Color, ConstantEffect, Device, Effect, EffectSequence, Error, FixedSleep,
    Interrupt, PulseEffect, PulseShape, Renderer, Result, SimulatedDevice, Timing,
};
use clap::{Parser, Subcommand, ValueEnum};
use palette::Srgb;

/// Controller for the Embrava Blynclight (BLYNCUSB30-152) USB LED indicator
#[derive(Parser)]
struct Cli {
    /// Log every frame sent to the light
    #[arg(long)]
    verbose: bool,

    /// Show the light in a window instead of driving the hardware
    #[arg(long)]
    simulate: bool,

    /// TOML file with default speeds, frame rate and window settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Cycle through red, blue, green colors
    Cycle {
        #[arg(long)]
        speed: Option<f64>,
    },

    /// Set a specific color
    Color {
        /// Red intensity [0,255]
        red: i32,
        /// Blue intensity [0,255]
        blue: i32,
        /// Green intensity [0,255]
        green: i32,
    },

    /// Set a color given as #rrggbb
    Hex {
        #[arg(value_parser = parse_hex)]
        color: Srgb<u8>,
    },

    /// Pulse a specific color
    Pulse {
        #[arg(long)]
        speed: Option<f64>,
        /// Number of pulses
        #[arg(long)]
        iterations: Option<u32>,
        #[arg(long, value_enum, default_value_t = Shape::Fourth)]
        shape: Shape,
        /// Red intensity [0,255]
        red: i32,
        /// Blue intensity [0,255]
        blue: i32,
        /// Green intensity [0,255]
        green: i32,
    },

    /// Runs the simulator window; started by --simulate
    #[command(hide = true)]
    SimulatorWindow,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    /// Short, sharp pulse
    Fourth,
    /// Soft, wide pulse
    Squared,
}

impl From<Shape> for PulseShape {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Fourth => PulseShape::SineFourth,
            Shape::Squared => PulseShape::SineSquared,
        }
    }
}

fn parse_hex(value: &str) -> std::result::Result<Srgb<u8>, String> {
    Srgb::<u8>::from_str(value).map_err(|err| format!("{}: {}", value, err))
}

fn intensities(red: i32, blue: i32, green: i32) -> Color {
    Color::new(red as f64, blue as f64, green as f64)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn launch_simulator(args: &Cli) -> Result<SimulatedDevice> {
    let mut command = process::Command::new(env::current_exe()?);
    if args.verbose {
        command.arg("--verbose");
    }
    if let Some(config) = &args.config {
        command.arg("--config").arg(config);
    }
    command.arg("simulator-window");

    SimulatedDevice::spawn(command)
}

fn play(action: &Action, settings: &Settings, renderer: &mut Renderer<'_>) -> Result<()> {
    let step = settings.step();
    let hold = Timing::once().with_step(step);

    match action {
        Action::Cycle { speed } => {
            let mut sequence = EffectSequence::new(speed.unwrap_or(settings.cycle_speed))
                .with_step(step)
                .then(ConstantEffect::new(intensities(255, 0, 0)).with_timing(hold))
                .then(ConstantEffect::new(intensities(0, 255, 0)).with_timing(hold))
                .then(ConstantEffect::new(intensities(0, 0, 255)).with_timing(hold));
            loop {
                sequence.render(renderer)?;
            }
        }
        Action::Color { red, blue, green } => ConstantEffect::new(intensities(*red, *blue, *green))
            .with_timing(hold)
            .render(renderer),
        Action::Hex { color } => ConstantEffect::new(Color::from(*color))
            .with_timing(hold)
            .render(renderer),
        Action::Pulse {
            speed,
            iterations,
            shape,
            red,
            blue,
            green,
        } => {
            let mut effect = PulseEffect::with_shape(intensities(*red, *blue, *green), (*shape).into())
                .with_speed(speed.unwrap_or(settings.pulse_speed))
                .with_step(step);
            for _ in 0..iterations.unwrap_or(settings.pulse_iterations) {
                effect.render(renderer)?;
            }
            Ok(())
        }
        Action::SimulatorWindow => unreachable!("the window process opens no device"),
    }
}

fn run(args: &Cli) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;

    if let Action::SimulatorWindow = args.action {
        // Ctrl-C reaches this process too; SDL turns it into a window close.
        return window::run_window(&settings.window());
    }

    let interrupt = match Interrupt::on_ctrlc() {
        Ok(interrupt) => interrupt,
        Err(err) => {
            log::warn!("Cannot handle Ctrl-C: {}", err);
            Interrupt::new()
        }
    };

    let mut device: Box<dyn Device> = if args.simulate {
        Box::new(launch_simulator(args)?)
    } else {
        Box::new(Blynclight::open()?)
    };

    let mut renderer = Renderer::new(device.as_mut())
        .with_pacer(FixedSleep::new(args.verbose))
        .with_interrupt(interrupt);
    play(&args.action, &settings, &mut renderer)
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    let code = match run(&args) {
        Ok(()) | Err(Error::Interrupted) => 0,
        Err(Error::DeviceNotFound { .. }) => {
            eprintln!("Error: Could not find Blynclight. Is it plugged in?");
            1
        }
        Err(err) => {
            log::error!("{}", err);
            1
        }
    };

    process::exit(code);
}
