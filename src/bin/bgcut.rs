use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use bgcut::ImageIo as _;
use clap::{Parser, Subcommand, ValueEnum};

const DEFAULT_CANVAS: bgcut::PixelSize = bgcut::PixelSize {
    width: 300,
    height: 300,
};

#[derive(Parser, Debug)]
#[command(name = "bgcut", version)]
struct Cli {
    /// Emit debug-level logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove the background of an image with an untouched initial mask.
    Remove(RemoveArgs),
    /// Replay a JSON gesture script against an image, then save the result.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct RemoveArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; format follows the extension, PNG otherwise.
    #[arg(long)]
    out: PathBuf,

    /// Brightness threshold (0-255).
    #[arg(long, default_value_t = 200)]
    threshold: u8,

    /// How the mask is derived from the image.
    #[arg(long, value_enum, default_value_t = MaskInitChoice::Luminance)]
    mask_init: MaskInitChoice,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Gesture script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output image; format follows the extension, PNG otherwise.
    #[arg(long)]
    out: PathBuf,

    /// Also write the final on-screen preview pane.
    #[arg(long)]
    preview: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MaskInitChoice {
    Luminance,
    Protected,
    Eligible,
}

impl From<MaskInitChoice> for bgcut::MaskInit {
    fn from(choice: MaskInitChoice) -> Self {
        match choice {
            MaskInitChoice::Luminance => Self::Luminance,
            MaskInitChoice::Protected => Self::AllProtected,
            MaskInitChoice::Eligible => Self::AllEligible,
        }
    }
}

#[derive(serde::Deserialize, Debug)]
struct Script {
    #[serde(default)]
    canvas: Option<bgcut::PixelSize>,
    #[serde(default)]
    opts: bgcut::SessionOpts,
    events: Vec<bgcut::GestureEvent>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Remove(args) => cmd_remove(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: Script = serde_json::from_reader(r).with_context(|| "parse gesture script JSON")?;
    Ok(script)
}

fn cmd_remove(args: RemoveArgs) -> anyhow::Result<()> {
    let opts = bgcut::SessionOpts {
        threshold: args.threshold,
        mask_init: args.mask_init.into(),
        ..bgcut::SessionOpts::default()
    };
    let mut session = bgcut::EditSession::headless(opts, DEFAULT_CANVAS);
    session
        .open(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    session
        .save(&args.out)
        .with_context(|| format!("save '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let canvas = script.canvas.unwrap_or(DEFAULT_CANVAS);
    bgcut::PixelSize::new(canvas.width, canvas.height).context("script canvas")?;

    let mut session = bgcut::EditSession::headless(script.opts, canvas);
    session
        .open(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;

    for (i, event) in script.events.into_iter().enumerate() {
        match session.handle(event) {
            Ok(()) => {}
            Err(e @ bgcut::BgcutError::InvalidInput(_)) => {
                eprintln!("event {i}: {e}");
            }
            Err(e) => return Err(e).with_context(|| format!("event {i}")),
        }
    }

    session
        .save(&args.out)
        .with_context(|| format!("save '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = &args.preview {
        let views = session.views().context("no preview was rendered")?;
        bgcut::FsImageIo
            .save(&views.preview, path)
            .with_context(|| format!("save preview '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    let summary = serde_json::json!({
        "threshold": session.threshold(),
        "window": session.window(),
        "protected": session.mask().map(|m| m.count_protected()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
