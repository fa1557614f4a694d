use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wechat2word_ai::GeminiGenerator;
use wechat2word_core::{
    export_with_config, prompt, ExporterConfig, ExporterError, FieldEdit, FormController,
    GeneratedScript, GenerationStatus, Submission,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch exporter script with Gemini
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Directory to write the script to (env: WECHAT2WORD_OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name of the script (env: WECHAT2WORD_FILE_NAME)
        #[arg(long)]
        file_name: Option<String>,

        /// Keep an existing script instead of replacing it
        #[arg(long)]
        no_overwrite: bool,

        /// Model name (optional, uses GEMINI_MODEL or the default if not specified)
        #[arg(short, long)]
        model: Option<String>,

        /// Also print the generated code to stdout
        #[arg(long)]
        print: bool,
    },

    /// Print the prompt that would be sent, without calling the API
    Prompt {
        #[command(flatten)]
        form: FormArgs,
    },
}

/// The fields of the generator form.
#[derive(Args, Debug, Default)]
struct FormArgs {
    /// File with one article URL per line ("-" reads stdin)
    #[arg(short = 'f', long)]
    urls_file: Option<PathBuf>,

    /// Article URL (repeatable)
    #[arg(short, long = "url")]
    urls: Vec<String>,

    /// Directory the generated script saves documents into
    #[arg(long)]
    save_path: Option<String>,

    /// Number of download threads (1-20)
    #[arg(short, long)]
    concurrency: Option<String>,

    /// Output file name pattern, must contain {title}
    #[arg(long)]
    filename_template: Option<String>,

    /// Skip images instead of embedding them
    #[arg(long)]
    no_images: bool,

    /// Add HTTP proxy support to the script
    #[arg(long)]
    proxy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Logs go to stderr so stdout carries only the prompt or the code
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            form,
            output,
            file_name,
            no_overwrite,
            model,
            print,
        } => {
            let mut controller = build_form(&form)?;
            ensure_article_links(&controller)?;
            info!("Recognized {} article links", controller.recognized_url_count());

            let generator = match model {
                Some(m) => GeminiGenerator::from_env_with_model(m),
                None => GeminiGenerator::from_env(),
            }
            .context("Failed to initialize Gemini")?;
            info!("Generating script with {}... (this may take a while)", generator.model());

            if controller.generate(&generator).await == Submission::Invalid {
                bail!("{}", controller.error().unwrap_or_default());
            }
            if controller.status() != GenerationStatus::Resolved {
                bail!("{}", controller.error().unwrap_or_default());
            }
            let Some(script) = controller.result() else {
                bail!("Generation finished without a script");
            };

            let mut exporter = ExporterConfig::from_env();
            if let Some(dir) = output {
                exporter = exporter.with_output_dir(dir);
            }
            if let Some(name) = file_name {
                exporter = exporter.with_file_name(name);
            }
            if no_overwrite {
                exporter = exporter.with_overwrite(false);
            }

            let path = deliver_script(script, &exporter, print, &mut std::io::stdout()).await?;
            eprintln!("Script saved to {}", path.display());
            eprintln!();
            eprintln!("1. Install dependencies:");
            eprintln!("   {}", script.install_command());
            eprintln!();
            eprintln!("2. Run the script:");
            eprintln!("{}", script.usage_instructions);
        }
        Commands::Prompt { form } => {
            let mut controller = build_form(&form)?;
            match controller.submit() {
                Submission::Dispatch(config) => {
                    println!("{}", prompt::build_prompt(&config)?);
                }
                _ => bail!("{}", controller.error().unwrap_or_default()),
            }
        }
    }

    Ok(())
}

/// Reject input without article links before any credentials are read.
fn ensure_article_links(controller: &FormController) -> Result<()> {
    if controller.recognized_url_count() == 0 {
        bail!("{}", ExporterError::NoValidUrls.user_message());
    }
    Ok(())
}

/// Print the code (when asked) and then write it to disk.
///
/// Printing comes first so the code survives a failed export.
async fn deliver_script<W: Write>(
    script: &GeneratedScript,
    exporter: &ExporterConfig,
    print: bool,
    out: &mut W,
) -> Result<PathBuf> {
    if print {
        writeln!(out, "{}", script.code)?;
        out.flush()?;
    }

    export_with_config(script, exporter)
        .await
        .context("Failed to write script file")
}

/// Fill a fresh form from the command line, the way a user fills the page.
fn build_form(args: &FormArgs) -> Result<FormController> {
    let mut controller = FormController::new();
    controller.edit(FieldEdit::UrlInput(read_url_input(args)?));

    if let Some(path) = &args.save_path {
        controller.edit(FieldEdit::SavePath(path.clone()));
    }
    if let Some(raw) = &args.concurrency {
        controller.edit(FieldEdit::Concurrency(raw.clone()));
    }
    if let Some(template) = &args.filename_template {
        controller.edit(FieldEdit::FilenameTemplate(template.clone()));
    }
    controller.edit(FieldEdit::IncludeImages(!args.no_images));
    controller.edit(FieldEdit::UseProxy(args.proxy));

    debug!("Form config: {:?}", controller.config());
    Ok(controller)
}

/// Collect the URL textarea contents from `--urls-file` and `--url`.
fn read_url_input(args: &FormArgs) -> Result<String> {
    let mut raw = match &args.urls_file {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read URLs from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL file {:?}", path))?,
        None => String::new(),
    };

    for url in &args.urls {
        if !raw.is_empty() && !raw.ends_with('\n') {
            raw.push('\n');
        }
        raw.push_str(url);
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_file_and_flags_are_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "https://mp.weixin.qq.com/s/abc\nnotaurl").unwrap();

        let args = FormArgs {
            urls_file: Some(file.path().to_path_buf()),
            urls: vec!["https://mp.weixin.qq.com/s/def".into()],
            ..Default::default()
        };
        let raw = read_url_input(&args).unwrap();
        assert_eq!(
            raw,
            "https://mp.weixin.qq.com/s/abc\nnotaurl\nhttps://mp.weixin.qq.com/s/def"
        );
    }

    #[test]
    fn form_reflects_arguments() {
        let args = FormArgs {
            urls: vec!["https://a".into(), "https://b".into()],
            save_path: Some("/srv/docs".into()),
            concurrency: Some("0".into()),
            filename_template: Some("{title}_wx.docx".into()),
            no_images: true,
            proxy: true,
            ..Default::default()
        };
        let mut form = build_form(&args).unwrap();
        assert_eq!(form.recognized_url_count(), 2);

        let config = form.config();
        assert_eq!(config.save_path, "/srv/docs");
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.filename_template, "{title}_wx.docx");
        assert!(!config.include_images);
        assert!(config.use_proxy);

        match form.submit() {
            Submission::Dispatch(config) => assert_eq!(config.urls, vec!["https://a", "https://b"]),
            other => panic!("unexpected submission: {:?}", other),
        }
    }

    #[test]
    fn missing_url_file_is_an_error() {
        let args = FormArgs {
            urls_file: Some(PathBuf::from("/nonexistent/links.txt")),
            ..Default::default()
        };
        assert!(build_form(&args).is_err());
    }

    #[test]
    fn input_without_links_fails_before_generator_setup() {
        let args = FormArgs {
            urls: vec!["notaurl".into()],
            ..Default::default()
        };
        let form = build_form(&args).unwrap();
        let err = ensure_article_links(&form).unwrap_err();
        assert_eq!(
            err.to_string(),
            ExporterError::NoValidUrls.user_message()
        );

        let form = build_form(&FormArgs {
            urls: vec!["https://mp.weixin.qq.com/s/abc".into()],
            ..Default::default()
        })
        .unwrap();
        assert!(ensure_article_links(&form).is_ok());
    }

    fn generated(code: &str) -> GeneratedScript {
        GeneratedScript {
            code: code.to_string(),
            requirements: vec!["requests".into()],
            usage_instructions: "python wechat_batch_exporter.py".into(),
        }
    }

    #[tokio::test]
    async fn printed_code_survives_failed_export() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ExporterConfig::default()
            .with_output_dir(dir.path())
            .with_overwrite(false);
        std::fs::write(exporter.script_path(), "old").unwrap();

        let mut out = Vec::new();
        let result = deliver_script(&generated("print('generated')"), &exporter, true, &mut out).await;

        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "print('generated')\n");
        assert_eq!(std::fs::read_to_string(exporter.script_path()).unwrap(), "old");
    }

    #[tokio::test]
    async fn deliver_writes_file_without_printing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ExporterConfig::default().with_output_dir(dir.path());

        let mut out = Vec::new();
        let path = deliver_script(&generated("print(1)"), &exporter, false, &mut out)
            .await
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "print(1)");
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "wechat2word",
            "generate",
            "--url",
            "https://a",
            "-c",
            "8",
            "--no-images",
            "--print",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { form, print, .. } => {
                assert_eq!(form.urls, vec!["https://a"]);
                assert_eq!(form.concurrency.as_deref(), Some("8"));
                assert!(form.no_images);
                assert!(print);
            }
            Commands::Prompt { .. } => panic!("expected generate"),
        }
    }
}
