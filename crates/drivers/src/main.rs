mod config;
mod logging;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use config::{AppConfig, Overrides};
use dialoguer::Confirm;
use facematch_adapters::{
    present_stats, present_upload_report, present_written, FsImageReader, HtmlPage, HttpFaceApi,
    ThreadPacer, WalkdirImageScanner,
};
use facematch_application::{
    resolve_event, result_container, BatchUploadService, Field, FormId, ImageInput, NameMapping,
    Outcome, PageEvent, StatSlot, Trigger, UploadFolderCommand, ViewController, HISTORY_TAB,
    MANAGE_TAB,
};
use facematch_domain::{FaceId, PageRequest};
use log::debug;

#[derive(Debug, Parser)]
#[command(name = "facematch", version, about = "Client for a face-recognition server")]
struct Cli {
    /// Server root, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    server: Option<String>,
    /// Where the rendered page is written
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Detect faces in an image
    Detect { image: PathBuf },
    /// Register one person from an image
    Add {
        image: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Register several people from one group image
    BatchAdd {
        image: PathBuf,
        /// Comma-separated, in face order
        #[arg(long)]
        names: String,
    },
    /// Find the closest registered faces
    Search {
        image: PathBuf,
        #[arg(long)]
        top_k: Option<String>,
    },
    /// List registered faces
    Faces {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one registered face
    Face { id: String },
    /// Delete a registered face after confirmation
    Delete {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show face and search counters
    Stats,
    /// List past searches
    History {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Register every image in a folder
    UploadFolder {
        folder: String,
        /// CSV with a header naming filename, name and optionally description
        #[arg(long)]
        mapping: Option<PathBuf>,
        #[arg(long)]
        pause_ms: Option<u64>,
    },
}

#[derive(Debug)]
enum CommandError {
    Usage(String),
    Runtime(anyhow::Error),
}

impl From<anyhow::Error> for CommandError {
    fn from(error: anyhow::Error) -> Self {
        Self::Runtime(error)
    }
}

fn main() -> ExitCode {
    logging::init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(error)) => {
            eprintln!("{error:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let config = AppConfig::load(&Overrides {
        server: cli.server,
        out: cli.out,
    })
    .map_err(|error| CommandError::Usage(format!("{error:#}")))?;
    debug!("using server {}{}", config.server_url, config.api_base);

    let api = HttpFaceApi::new(&config.server_url, &config.api_base, config.timeout)
        .map_err(|error| anyhow!(error))?;

    match cli.command {
        Command::UploadFolder {
            folder,
            mapping,
            pause_ms,
        } => upload_folder(api, &config, folder, mapping, pause_ms),
        command => run_page(&api, &config, command),
    }
}

fn run_page(api: &HttpFaceApi, config: &AppConfig, command: Command) -> Result<(), CommandError> {
    let mut settings = config.view_settings()?;
    match &command {
        Command::Faces { skip, limit } => {
            settings.faces_page = PageRequest::new(*skip, limit.unwrap_or(settings.faces_page.limit));
        }
        Command::History { skip, limit } => {
            settings.history_page =
                PageRequest::new(*skip, limit.unwrap_or(settings.history_page.limit));
        }
        _ => {}
    }

    let assume_yes = matches!(command, Command::Delete { yes: true, .. });
    let page = HtmlPage::new("Face Recognition", Box::new(FsImageReader))
        .with_confirmer(move |prompt| assume_yes || ask(prompt));
    let events = prepare(&page, command)?;

    let controller = ViewController::new(api, &page, settings);
    let mut last = Outcome::Ignored;
    let mut reported = None;
    for event in events {
        reported = result_container(&event).or(reported);
        last = controller.dispatch(event);
    }

    let path = config.output_path.display().to_string();
    fs::write(&config.output_path, page.render_document())
        .with_context(|| format!("writing {path}"))?;
    println!(
        "{}",
        present_written(&path, reported.map(|container| container.element_id()))
    );
    println!(
        "{}",
        present_stats(
            page.stat(StatSlot::TotalFaces),
            page.stat(StatSlot::TotalSearches)
        )
    );
    for alert in page.alerts() {
        eprintln!("{alert}");
    }

    match last {
        Outcome::Rendered | Outcome::Ignored => Ok(()),
        Outcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
        Outcome::Rejected => Err(CommandError::Usage(format!(
            "input rejected, see {}",
            reported
                .map(|container| format!("#{}", container.element_id()))
                .unwrap_or(path)
        ))),
        Outcome::Failed(error) => Err(CommandError::Runtime(anyhow!(error))),
    }
}

/// Fills the page inputs for `command` and lists the events its elements
/// raise, the initial page-ready event first.
fn prepare(page: &HtmlPage, command: Command) -> Result<Vec<PageEvent>, CommandError> {
    let mut events = vec![PageEvent::Ready];
    match command {
        Command::Detect { image } => {
            page.select_file(ImageInput::Detect, image);
            events.extend(choose_and_submit(ImageInput::Detect, FormId::Detect)?);
        }
        Command::Add {
            image,
            name,
            description,
        } => {
            page.select_file(ImageInput::Add, image);
            page.set_field(Field::PersonName, name.unwrap_or_default());
            page.set_field(Field::PersonDescription, description.unwrap_or_default());
            events.extend(choose_and_submit(ImageInput::Add, FormId::Add)?);
        }
        Command::BatchAdd { image, names } => {
            page.select_file(ImageInput::Batch, image);
            page.set_field(Field::BatchNames, names);
            events.extend(choose_and_submit(ImageInput::Batch, FormId::Batch)?);
        }
        Command::Search { image, top_k } => {
            page.select_file(ImageInput::Search, image);
            page.set_field(Field::TopK, top_k.unwrap_or_default());
            events.extend(choose_and_submit(ImageInput::Search, FormId::Search)?);
        }
        Command::Faces { .. } => events.push(bound(MANAGE_TAB, Trigger::Click)?),
        Command::Face { id } => {
            page.set_field(Field::FaceLookupId, id);
            events.push(bound(FormId::FaceLookup.element_id(), Trigger::Submit)?);
        }
        Command::Delete { id, name, .. } => {
            // Delete buttons live on roster cards, not in the page bindings.
            let face_id = FaceId::new(id)
                .map_err(|error| CommandError::Usage(format!("invalid face id: {error}")))?;
            events.push(PageEvent::DeleteRequested {
                face_id,
                name: name.unwrap_or_else(|| format!("face #{face_id}")),
            });
        }
        Command::Stats => {}
        Command::History { .. } => events.push(bound(HISTORY_TAB, Trigger::Click)?),
        Command::UploadFolder { .. } => {
            return Err(CommandError::Usage(
                "upload-folder does not render a page".to_string(),
            ))
        }
    }
    Ok(events)
}

fn choose_and_submit(input: ImageInput, form: FormId) -> Result<[PageEvent; 2], CommandError> {
    Ok([
        bound(input.element_id(), Trigger::Change)?,
        bound(form.element_id(), Trigger::Submit)?,
    ])
}

fn bound(element: &str, trigger: Trigger) -> Result<PageEvent, CommandError> {
    resolve_event(element, trigger).ok_or_else(|| {
        CommandError::Usage(format!("no handler bound to {element} ({trigger:?})"))
    })
}

fn upload_folder(
    api: HttpFaceApi,
    config: &AppConfig,
    folder: String,
    mapping: Option<PathBuf>,
    pause_ms: Option<u64>,
) -> Result<(), CommandError> {
    let mapping = match mapping {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading mapping file {}", path.display()))?;
            NameMapping::parse(&text).map_err(|error| CommandError::Usage(error.to_string()))?
        }
        None => NameMapping::default(),
    };

    let service = BatchUploadService::new(
        Box::new(api),
        Box::new(WalkdirImageScanner),
        Box::new(FsImageReader),
        Box::new(ThreadPacer),
    );
    let report = service
        .upload_folder(UploadFolderCommand {
            folder,
            mapping,
            pause: pause_ms
                .map(Duration::from_millis)
                .unwrap_or(config.upload_pause),
        })
        .map_err(|error| anyhow!("upload failed: {error}"))?;
    println!("{}", present_upload_report(&report));
    Ok(())
}

fn ask(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}
