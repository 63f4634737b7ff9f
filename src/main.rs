use clap::{Parser, Subcommand};
use stagger::app::AppModel;
use stagger::carousel::{Animator, LogAnimator};
use stagger::command::Command;
use stagger::config;
use stagger::sys::runtime::{self, Services};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stagger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run the carousel, reading commands from stdin and the control socket
    Run {
        /// Do not read commands from stdin
        #[arg(long)]
        socket_only: bool,
        /// Do not open the control socket
        #[arg(long)]
        no_socket: bool,
    },
    /// Send one command to a running carousel
    Send {
        /// e.g. `next`, `jump 3`, `compact on`
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Print the transforms for one state and exit
    Layout {
        /// Active slide index (wraps)
        #[arg(short, long, allow_hyphen_values = true)]
        active: Option<isize>,
        /// Use the compact profile even if the config does not
        #[arg(long)]
        compact: bool,
        /// Override the configured gap
        #[arg(short, long)]
        gap: Option<f64>,
        /// Print the first-paint placement instead of the settled one
        #[arg(long)]
        entrance: bool,
    },
    /// Write the default config file if none exists and print its path
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = config::load_or_default(cli.config.clone());

    match cli.command {
        Commands::Run {
            socket_only,
            no_socket,
        } => {
            let watch_path = match cli.config.clone() {
                Some(p) => Some(p),
                None => config::get_config_path().ok(),
            };
            let services = Services {
                socket_path: (!no_socket).then(|| cfg.socket_path.clone()),
                watch_path,
                stdin: !socket_only,
            };
            if !services.stdin && services.socket_path.is_none() {
                anyhow::bail!("Nothing to read commands from: both stdin and the socket are off");
            }
            let app = AppModel::new(&cfg, LogAnimator::stdout(), cli.config);
            runtime::run(app, services)?;
            Ok(())
        }
        Commands::Send { words } => {
            let line = words.join(" ");
            // validate locally so typos fail here rather than in the daemon log
            line.parse::<Command>()?;
            send_command(&cfg.socket_path, &line)
        }
        Commands::Layout {
            active,
            compact,
            gap,
            entrance,
        } => {
            let carousel = cfg.preview_carousel(active, compact, gap);
            let frame = if entrance {
                carousel.entrance_frame()
            } else {
                carousel.transforms().to_vec()
            };
            LogAnimator::stdout().present(&frame, &cfg.timing);
            Ok(())
        }
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn send_command(socket_path: &std::path::Path, cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to stagger at {}: {}. Is `stagger run` running?",
            socket_path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
