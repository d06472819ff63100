use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use serde::Serialize;
use telegraph_core::{
    AccountField, BlankText, ClientConfig, ConvertConfig, CreateAccount, CreatePage, DEFAULT_BASE_URL,
    DEFAULT_UPLOAD_URL, EditAccountInfo, EditPage, GetAccountInfo, GetPage, GetPageList, GetViews, MediaKind,
    PageContent, RevokeAccessToken, Telegraph, html_to_nodes_with_config, json_to_nodes, nodes_to_json,
    nodes_to_json_pretty,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Publish pages to Telegraph and convert HTML to Telegraph content nodes
#[derive(Parser, Debug)]
#[command(name = "telegraph")]
#[command(version)]
#[command(about = "Publish pages to Telegraph and convert HTML to Telegraph content nodes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Telegraph API base URL
    #[arg(long, global = true, env = "TELEGRAPH_BASE_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// Telegraph upload URL
    #[arg(long, global = true, env = "TELEGRAPH_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL, value_name = "URL")]
    upload_url: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,

    /// Reject whitespace-only text between tags instead of dropping it
    #[arg(long, global = true)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct TokenArgs {
    /// Access token of the Telegraph account
    #[arg(long, env = "TELEGRAPH_ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    access_token: String,
}

#[derive(Args, Debug)]
struct AuthorArgs {
    /// Author name shown below the title
    #[arg(long, value_name = "NAME")]
    author_name: Option<String>,

    /// Profile link opened from the author name
    #[arg(long, value_name = "URL")]
    author_url: Option<String>,
}

#[derive(Args, Debug)]
struct ContentArgs {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Input is a JSON array of content nodes rather than HTML
    #[arg(long)]
    nodes: bool,

    /// Return the page content in the response
    #[arg(long)]
    return_content: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert HTML to Telegraph content nodes (no network)
    Convert {
        /// Local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: String,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Create a new account
    CreateAccount {
        /// Account name, shown above the Edit/Publish button
        #[arg(value_name = "SHORT_NAME")]
        short_name: String,

        #[command(flatten)]
        author: AuthorArgs,
    },

    /// Update account details
    EditAccount {
        #[command(flatten)]
        token: TokenArgs,

        /// New account name
        #[arg(long, value_name = "NAME")]
        short_name: Option<String>,

        #[command(flatten)]
        author: AuthorArgs,
    },

    /// Show account details
    Account {
        #[command(flatten)]
        token: TokenArgs,

        /// Fields to return (short_name, author_name, author_url, auth_url, page_count)
        #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
        fields: Vec<AccountField>,
    },

    /// Revoke the access token and print the new one
    RevokeToken {
        #[command(flatten)]
        token: TokenArgs,
    },

    /// Publish a new page
    CreatePage {
        #[command(flatten)]
        token: TokenArgs,

        /// Page title
        #[arg(short, long)]
        title: String,

        #[command(flatten)]
        author: AuthorArgs,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Replace the title and content of a page
    EditPage {
        #[command(flatten)]
        token: TokenArgs,

        /// Path of the page, e.g. Sample-Page-12-15
        #[arg(long, value_name = "PATH")]
        path: String,

        /// Page title
        #[arg(short, long)]
        title: String,

        #[command(flatten)]
        author: AuthorArgs,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Show a page
    Page {
        /// Path of the page, e.g. Sample-Page-12-15
        #[arg(value_name = "PATH")]
        path: String,

        /// Include the page content
        #[arg(long)]
        return_content: bool,
    },

    /// List the pages of an account
    Pages {
        #[command(flatten)]
        token: TokenArgs,

        /// Index of the first page
        #[arg(long, value_name = "NUM")]
        offset: Option<u32>,

        /// Number of pages (0-200)
        #[arg(long, value_name = "NUM")]
        limit: Option<u32>,
    },

    /// Show the view count of a page
    Views {
        /// Path of the page, e.g. Sample-Page-12-15
        #[arg(value_name = "PATH")]
        path: String,

        #[arg(long)]
        year: Option<u32>,

        #[arg(long, requires = "year")]
        month: Option<u32>,

        #[arg(long, requires = "month")]
        day: Option<u32>,

        #[arg(long, requires = "day")]
        hour: Option<u32>,
    },

    /// Upload a photo or video and print its source path
    Upload {
        /// File to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Media kind (photo, video)
        #[arg(short, long, default_value = "photo", value_name = "KIND")]
        kind: MediaKind,
    },

    /// Generate a shell completion script
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read HTML or JSON input from a file or stdin
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn page_content(args: &ContentArgs) -> anyhow::Result<PageContent> {
    let raw = read_input(&args.input)?;

    if args.nodes {
        let nodes = json_to_nodes(&raw).context("Failed to decode content nodes")?;
        Ok(PageContent::Nodes(nodes))
    } else {
        Ok(PageContent::Html(raw))
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode result")?;
    println!("{}", json);
    Ok(())
}

fn convert(
    cli: &Cli, input: &str, output: Option<&PathBuf>, pretty: bool, config: &ConvertConfig,
) -> anyhow::Result<()> {
    if cli.verbose {
        let source = if input == "-" { "stdin".to_string() } else { input.to_string() };
        echo::print_step(1, 3, &format!("Reading from {}", source.bright_white()));
    }

    let html = read_input(input)?;

    if cli.verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
        echo::print_step(2, 3, "Converting HTML to nodes");
    }

    let started = Instant::now();
    let nodes = html_to_nodes_with_config(&html, config).context("Failed to convert HTML")?;
    let json = if pretty { nodes_to_json_pretty(&nodes)? } else { nodes_to_json(&nodes)? };

    if cli.verbose {
        echo::print_detail("Nodes", &nodes.len().to_string());
        echo::print_timing("Convert", started.elapsed());
        echo::print_step(3, 3, "Writing output");
    }

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn client(cli: &Cli, convert: ConvertConfig) -> anyhow::Result<Telegraph> {
    let mut builder = ClientConfig::builder()
        .base_url(cli.base_url.as_str())
        .upload_url(cli.upload_url.as_str())
        .timeout(cli.timeout)
        .convert(convert);

    if let Some(user_agent) = &cli.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }

    if cli.verbose {
        echo::print_detail("API", &cli.base_url);
    }

    Telegraph::with_config(builder.build()).context("Failed to create client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let convert_config = ConvertConfig { blank_text: if cli.strict { BlankText::Reject } else { BlankText::Skip } };

    match &cli.command {
        Command::Convert { input, output, pretty } => convert(&cli, input, output.as_ref(), *pretty, &convert_config)?,
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "telegraph", &mut io::stdout());
        }
        Command::CreateAccount { short_name, author } => {
            let method = CreateAccount {
                short_name: short_name.clone(),
                author_name: author.author_name.clone(),
                author_url: author.author_url.clone(),
            };
            let account = client(&cli, convert_config)?
                .create_account(&method)
                .await
                .context("Failed to create account")?;
            print_json(&account)?;
        }
        Command::EditAccount { token, short_name, author } => {
            let method = EditAccountInfo {
                access_token: token.access_token.clone(),
                short_name: short_name.clone(),
                author_name: author.author_name.clone(),
                author_url: author.author_url.clone(),
            };
            let account = client(&cli, convert_config)?
                .edit_account_info(&method)
                .await
                .context("Failed to edit account")?;
            print_json(&account)?;
        }
        Command::Account { token, fields } => {
            let method = GetAccountInfo { access_token: token.access_token.clone(), fields: fields.clone() };
            let account = client(&cli, convert_config)?
                .get_account_info(&method)
                .await
                .context("Failed to get account info")?;
            print_json(&account)?;
        }
        Command::RevokeToken { token } => {
            let method = RevokeAccessToken::new(token.access_token.as_str());
            let account = client(&cli, convert_config)?
                .revoke_access_token(&method)
                .await
                .context("Failed to revoke access token")?;
            print_json(&account)?;
        }
        Command::CreatePage { token, title, author, content } => {
            let method = CreatePage {
                access_token: token.access_token.clone(),
                title: title.clone(),
                author_name: author.author_name.clone(),
                author_url: author.author_url.clone(),
                content: page_content(content)?,
                return_content: content.return_content,
            };
            let page = client(&cli, convert_config)?
                .create_page(&method)
                .await
                .context("Failed to create page")?;
            echo::print_success(&format!("Published {}", page.url.bright_white()));
            print_json(&page)?;
        }
        Command::EditPage { token, path, title, author, content } => {
            let method = EditPage {
                access_token: token.access_token.clone(),
                path: path.clone(),
                title: title.clone(),
                content: page_content(content)?,
                author_name: author.author_name.clone(),
                author_url: author.author_url.clone(),
                return_content: content.return_content,
            };
            let page = client(&cli, convert_config)?
                .edit_page(&method)
                .await
                .context("Failed to edit page")?;
            echo::print_success(&format!("Updated {}", page.url.bright_white()));
            print_json(&page)?;
        }
        Command::Page { path, return_content } => {
            let method = GetPage { path: path.clone(), return_content: *return_content };
            let page = client(&cli, convert_config)?
                .get_page(&method)
                .await
                .context("Failed to get page")?;
            print_json(&page)?;
        }
        Command::Pages { token, offset, limit } => {
            let method = GetPageList { access_token: token.access_token.clone(), offset: *offset, limit: *limit };
            let list = client(&cli, convert_config)?
                .get_page_list(&method)
                .await
                .context("Failed to list pages")?;
            print_json(&list)?;
        }
        Command::Views { path, year, month, day, hour } => {
            let method = GetViews { path: path.clone(), year: *year, month: *month, day: *day, hour: *hour };
            let views = client(&cli, convert_config)?
                .get_views(&method)
                .await
                .context("Failed to get views")?;
            print_json(&views)?;
        }
        Command::Upload { file, kind } => {
            if cli.verbose {
                echo::print_step(1, 1, &format!("Uploading {}", file.display().bright_white()));
            }
            let src = client(&cli, convert_config)?
                .upload_file(file, *kind)
                .await
                .with_context(|| format!("Failed to upload {}", file.display()))?;
            println!("{}", src);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use telegraph_core::{Node, NodeElement};

    fn content_args(input: &std::path::Path, nodes: bool) -> ContentArgs {
        ContentArgs { input: input.to_string_lossy().into_owned(), nodes, return_content: false }
    }

    #[test]
    fn test_page_content_reads_nodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, r#"[{"tag":"p","children":["Hello"]}," world"]"#).unwrap();

        let content = page_content(&content_args(&path, true)).unwrap();
        assert_eq!(
            content,
            PageContent::Nodes(vec![Node::from(NodeElement::new("p").with_child("Hello")), Node::text(" world")])
        );
    }

    #[test]
    fn test_page_content_rejects_invalid_nodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, "<p>not json</p>").unwrap();

        let err = page_content(&content_args(&path, true)).unwrap_err();
        assert!(err.to_string().contains("Failed to decode content nodes"));
    }

    #[test]
    fn test_page_content_keeps_html() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("content.html");
        fs::write(&path, "<p>Hello</p>").unwrap();

        let content = page_content(&content_args(&path, false)).unwrap();
        assert_eq!(content, PageContent::Html("<p>Hello</p>".to_string()));
    }
}
