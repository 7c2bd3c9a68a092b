use clap::{Parser, Subcommand};
use model_agents::config::config_search_paths;
use model_agents::models::{known_claude_models, known_openai_chat_models, OPENAI_SPEECH_MODELS};
use model_agents::{
    AgentsConfig, GenerateOptions, Message, ReturnType, SharedCallLog, SpeechOptions,
    SpeechResult, TranslationRequest, Voice,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "model-agents",
    about = "Translate with DeepL, chat with OpenAI or Claude, and synthesize speech",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Append a JSONL record of every call to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one or more texts with DeepL
    Translate {
        /// Target language code, e.g. DE
        #[arg(short, long)]
        to: String,
        /// Source language code; detected when omitted
        #[arg(short, long)]
        from: Option<String>,
        /// Use the paid-tier endpoint (overrides config)
        #[arg(long)]
        pro: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Ask an OpenAI chat model
    Chat {
        #[arg(short, long)]
        model: Option<String>,
        #[command(flatten)]
        gen: GenArgs,
        prompt: String,
    },
    /// Ask a Claude model
    Claude {
        #[arg(short, long)]
        model: Option<String>,
        #[command(flatten)]
        gen: GenArgs,
        prompt: String,
    },
    /// Synthesize speech with OpenAI
    Speak {
        /// filename, buffer or base64
        #[arg(long, default_value = "filename")]
        return_type: String,
        #[arg(short, long, default_value = "speech.mp3")]
        output: String,
        #[arg(long)]
        voice: Option<Voice>,
        text: String,
    },
    /// List the model ids each client knows about
    Models,
}

#[derive(clap::Args)]
struct GenArgs {
    /// System prompt
    #[arg(short, long)]
    system: Option<String>,
    /// Sampling temperature, clamped to [0, 1]
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Maximum output tokens
    #[arg(long, allow_negative_numbers = true)]
    max_tokens: Option<f64>,
}

impl GenArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            system: self.system.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_agents=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("no command given; see --help");
    };

    let config = AgentsConfig::find_and_load(cli.config.as_deref())?;
    let call_log = cli
        .log_file
        .as_ref()
        .map(SharedCallLog::new)
        .transpose()?;

    match command {
        Command::Translate { to, from, pro, text } => {
            let mut cfg = config.clone();
            if pro {
                cfg.deepl.pro = true;
            }
            let mut client = cfg.deepl_client()?;
            if let Some(log) = call_log {
                client = client.with_call_log(log);
            }

            let mut req = TranslationRequest::new(to, text);
            if let Some(from) = from {
                req = req.from_lang(from);
            }
            for t in client.translate(&req).await? {
                println!("[{}] {}", t.detected_source_language, t.text);
            }
        }
        Command::Chat { model, gen, prompt } => {
            let mut cfg = config.clone();
            if let Some(model) = model {
                cfg.openai.chat_model = model;
            }
            let mut client = cfg.chat_client()?;
            if let Some(log) = call_log {
                client = client.with_call_log(log);
            }
            let result = client.generate(&[Message::user(prompt)], &gen.options()).await?;
            println!("{}", result.text().unwrap_or_default());
        }
        Command::Claude { model, gen, prompt } => {
            let mut cfg = config.clone();
            if let Some(model) = model {
                cfg.anthropic.model = model;
            }
            let mut client = cfg.claude_client()?;
            if let Some(log) = call_log {
                client = client.with_call_log(log);
            }
            let result = client.generate(&[Message::user(prompt)], &gen.options()).await?;
            println!("{}", result.text().unwrap_or_default());
        }
        Command::Speak {
            return_type,
            output,
            voice,
            text,
        } => {
            let mut client = config.speech_client()?;
            if let Some(log) = call_log {
                client = client.with_call_log(log);
            }
            let return_type: ReturnType = return_type.parse()?;
            let opts = SpeechOptions::default()
                .return_type(return_type)
                .filename(output)
                .voice(voice.unwrap_or(config.openai.voice));

            match client.convert(Some(text.as_str()), &opts).await? {
                SpeechResult::Filename(path) => println!("{}", path.display()),
                SpeechResult::Base64(b64) => println!("{b64}"),
                SpeechResult::Buffer(bytes) => {
                    use std::io::Write;
                    std::io::stdout().write_all(&bytes)?;
                }
                SpeechResult::Empty => {}
            }
        }
        Command::Models => {
            print_models("OpenAI chat", &known_openai_chat_models());
            print_models("OpenAI speech", OPENAI_SPEECH_MODELS);
            print_models("Claude", &known_claude_models());
        }
    }

    Ok(())
}

fn print_models(heading: &str, models: &[&str]) {
    println!("{heading}:");
    for model in models {
        println!("  {model}");
    }
}
