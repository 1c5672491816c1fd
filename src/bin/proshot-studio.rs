// Interactive terminal studio for AI headshot editing

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Parser;
use proshot::config::Config;
use proshot::intake;
use proshot::session::Session;
use proshot::styles::{self, HEADSHOT_STYLES, HeadshotStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use termimad::{MadSkin, crossterm::style::Color};

#[derive(Parser, Debug)]
#[command(author, version, about = "AI headshot and selfie edit studio", long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image model (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Text model used for random prompts (overrides config)
    #[arg(long)]
    text_model: Option<String>,
}

fn create_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    skin.headers[0].set_fg(Color::Cyan);
    skin.headers[1].set_fg(Color::Blue);

    skin.bold.set_fg(Color::White);
    skin.italic.set_fg(Color::Magenta);
    skin.inline_code.set_fg(Color::Yellow);

    skin
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.image_model = model;
    }
    if let Some(model) = args.text_model {
        config.text_model = model;
    }

    println!("ProShot v{} - AI Headshot Studio\n", env!("CARGO_PKG_VERSION"));
    if config.api_key.is_empty() {
        println!("Note: no API key configured (GEMINI_API_KEY); generation will fail until one is set.\n");
    }

    let client = gemini::Client::new(config.api_key.clone())
        .with_base_url(config.base_url.clone())
        .with_models(config.image_model.clone(), config.text_model.clone());
    let mut session = Session::new(Arc::new(client));

    let skin = create_skin();
    println!(
        "Commands: /styles, /style <id>, /upload <path>, /ref <path>, /text <instruction>,\n\
         /random, /generate, /save [n], /status, /clear, /clearref, exit\n"
    );

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "/styles" => print_styles(&skin, session.style()),
            "/style" => select_style(&mut session, rest),
            "/upload" => match intake::ingest_file(rest).await {
                Ok(image) => {
                    println!("Uploaded {} ({})", describe(&image), image.mime_type);
                    session.upload_source(image);
                }
                Err(e) => eprintln!("Error: {}", e),
            },
            "/ref" => match intake::ingest_file(rest).await {
                Ok(image) => {
                    println!("Reference set: {} ({})", describe(&image), image.mime_type);
                    session.upload_reference(image);
                }
                Err(e) => eprintln!("Error: {}", e),
            },
            "/clear" => {
                session.clear_source();
                println!("Source image and results cleared.");
            }
            "/clearref" => {
                session.clear_reference();
                println!("Reference image cleared.");
            }
            "/text" => {
                session.set_free_text(rest);
                if rest.is_empty() {
                    println!("Instruction cleared.");
                }
            }
            "/random" => {
                println!("Asking the model for an edit idea...");
                session.randomize_prompt().await;
                println!("Instruction: {}", session.free_text());
            }
            "/generate" => {
                if session.source().is_none() {
                    eprintln!("Error: upload a selfie first (/upload <path>).");
                    continue;
                }
                println!("Generating...");
                session.generate().await;
                match session.error() {
                    Some(e) => eprintln!("Error: {}", e),
                    None => {
                        if let Some(result) = session.results().first() {
                            println!(
                                "Done: {} ({} result{} this session). Use /save to write it to disk.",
                                result.label,
                                session.results().len(),
                                if session.results().len() == 1 { "" } else { "s" },
                            );
                        }
                    }
                }
            }
            "/save" => save_result(&session, rest),
            "/status" => print_status(&session),
            _ => eprintln!("Unknown command: {}", command),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn describe(image: &proshot::UploadedImage) -> &str {
    image.source_name.as_deref().unwrap_or("image")
}

fn select_style(session: &mut Session, tag: &str) {
    match HeadshotStyle::from_tag(tag) {
        Some(style) => {
            session.select_style(style);
            match style {
                HeadshotStyle::FaceSwap => {
                    println!("Style: Face Swap - upload a reference with /ref <path>.")
                }
                HeadshotStyle::Custom => {
                    println!("Style: Custom Only - set the instruction with /text <instruction>.")
                }
                preset => {
                    if let Some(option) = styles::lookup(preset) {
                        println!("Style: {} {}", option.icon, option.label);
                    }
                }
            }
        }
        None => eprintln!("Unknown style: {} (see /styles)", tag),
    }
}

fn print_styles(skin: &MadSkin, selected: HeadshotStyle) {
    let mut text = String::from("# Styles\n");
    for style in HEADSHOT_STYLES {
        text.push_str(&format!(
            "* {} `{}` **{}**{} - {}\n",
            style.icon,
            style.id.as_str(),
            style.label,
            if style.id == selected { " (selected)" } else { "" },
            style.description,
        ));
    }
    text.push_str(&format!(
        "* 🎭 `faceswap` **Face Swap**{} - Copy pose, body & background from a reference image.\n",
        if selected == HeadshotStyle::FaceSwap { " (selected)" } else { "" },
    ));
    text.push_str(&format!(
        "* ✨ `custom` **Custom Only**{} - Freeform text prompt.\n",
        if selected == HeadshotStyle::Custom { " (selected)" } else { "" },
    ));
    skin.print_text(&text);
    println!();
}

fn print_status(session: &Session) {
    match session.source() {
        Some(image) => println!("Selfie:      {} ({})", describe(image), image.mime_type),
        None => println!("Selfie:      none"),
    }
    match session.reference() {
        Some(image) => println!("Reference:   {} ({})", describe(image), image.mime_type),
        None => println!("Reference:   none"),
    }

    let style_label = match session.style() {
        HeadshotStyle::FaceSwap => "Face Swap",
        HeadshotStyle::Custom => "Custom Only",
        preset => styles::lookup(preset).map(|s| s.label).unwrap_or("Unknown"),
    };
    println!("Style:       {}", style_label);

    if session.free_text().is_empty() {
        println!("Instruction: (none)");
    } else {
        println!("Instruction: {}", session.free_text());
    }

    println!("Results:     {}", session.results().len());
    for (index, result) in session.results().iter().enumerate() {
        println!(
            "  [{}] {} - {} ({})",
            index,
            result.label,
            result.created_at.format("%H:%M:%S"),
            result.id,
        );
    }

    if let Some(error) = session.error() {
        eprintln!("Error:       {}", error);
    }
}

/// Write a generated result to disk as proshot-<id>.jpg
fn save_result(session: &Session, arg: &str) {
    let index = if arg.is_empty() {
        0
    } else {
        match arg.parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                eprintln!("Error: /save takes a result index (see /status).");
                return;
            }
        }
    };

    let Some(result) = session.results().get(index) else {
        eprintln!("Error: no result at index {}.", index);
        return;
    };

    let filename = format!("proshot-{}.jpg", result.id);
    match STANDARD.decode(&result.data) {
        Ok(bytes) => match std::fs::write(&filename, bytes) {
            Ok(()) => println!("Saved {}", filename),
            Err(e) => eprintln!("Error: failed to write {}: {}", filename, e),
        },
        Err(e) => eprintln!("Error: could not decode image data: {}", e),
    }
}
