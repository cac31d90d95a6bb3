//! Runs `render` and `check` against catalogs in a temporary directory.

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use transmark::RenderConfig;
use transmark_cli::{CheckArgs, CliError, RenderArgs, check, render};

struct Catalogs {
    _temp: TempDir,
    config: RenderConfig,
}

impl Catalogs {
    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let dir = self
            .config
            .catalog_dir
            .as_ref()
            .context("catalog dir configured")?;
        std::fs::write(dir.join(name), contents).context("write catalog")
    }
}

#[fixture]
fn catalogs() -> Catalogs {
    let temp = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp path");
    std::fs::write(
        path.join("cs.toml"),
        "[cart]\nitems = \"{count, plural, one {# položka} few {# položky} other {# položek}}\"\ncheckout = \"Pokračujte <0>k pokladně</0>.\"\n",
    )
    .expect("write cs catalog");
    std::fs::write(path.join("en.toml"), "greeting = \"Hello {name}\"\n").expect("write en catalog");
    Catalogs {
        _temp: temp,
        config: RenderConfig {
            locale: String::from("cs"),
            fallback_locales: vec![String::from("en")],
            catalog_dir: Some(path),
            ..RenderConfig::default()
        },
    }
}

fn render_args(id: &str) -> RenderArgs {
    RenderArgs {
        id: id.to_owned(),
        message: None,
        values: Vec::new(),
        components: Vec::new(),
    }
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_owned(), value.to_owned())
}

fn run_render(config: &RenderConfig, args: &RenderArgs) -> Result<String> {
    let mut out = Vec::new();
    render(config, args, &mut out)?;
    String::from_utf8(out).context("UTF-8 output")
}

#[rstest]
#[case::plural(
    RenderArgs { values: vec![pair("count", "3")], ..render_args("cart.items") },
    "3 položky\n"
)]
#[case::component(
    RenderArgs { components: vec![pair("0", "a")], ..render_args("cart.checkout") },
    "Pokračujte <a>k pokladně</a>.\n"
)]
#[case::fallback_locale(
    RenderArgs { values: vec![pair("name", "Dave")], ..render_args("greeting") },
    "Hello Dave\n"
)]
#[case::fallback_message(
    RenderArgs {
        message: Some(String::from("Line<br/>{name}")),
        values: vec![pair("name", "Dave")],
        components: vec![pair("br", "br")],
        ..render_args("missing")
    },
    "Line<br></br>Dave\n"
)]
fn renders_markup(
    catalogs: Catalogs,
    #[case] args: RenderArgs,
    #[case] expected: &str,
) -> Result<()> {
    let output = run_render(&catalogs.config, &args)?;
    ensure!(output == expected, "got {output:?}");
    Ok(())
}

#[rstest]
fn check_passes_valid_catalogs(catalogs: Catalogs) -> Result<()> {
    let mut out = Vec::new();
    check(&catalogs.config, &CheckArgs { locales: Vec::new() }, &mut out)?;
    let output = String::from_utf8(out)?;
    ensure!(
        output == "checked 3 template(s) in 2 locale(s), 0 invalid\n",
        "got {output:?}"
    );
    Ok(())
}

#[rstest]
fn check_reports_malformed_templates(catalogs: Catalogs) -> Result<()> {
    catalogs.write("de.toml", "ok = \"Hallo\"\nbroken = \"<0>offen\"\n")?;
    let mut out = Vec::new();
    let result = check(
        &catalogs.config,
        &CheckArgs {
            locales: vec![String::from("de")],
        },
        &mut out,
    );
    let output = String::from_utf8(out)?;
    ensure!(
        matches!(result, Err(CliError::InvalidTemplates { count: 1 })),
        "unexpected result {result:?}"
    );
    ensure!(output.starts_with("de broken: "), "got {output:?}");
    ensure!(output.ends_with("checked 2 template(s) in 1 locale(s), 1 invalid\n"));
    Ok(())
}

#[rstest]
fn check_requires_a_catalog_directory() -> Result<()> {
    let result = check(
        &RenderConfig::default(),
        &CheckArgs { locales: Vec::new() },
        &mut Vec::new(),
    );
    match result {
        Err(CliError::NoCatalogDir) => Ok(()),
        other => Err(anyhow!("expected NoCatalogDir, got {other:?}")),
    }
}

#[rstest]
fn check_rejects_malformed_locales(catalogs: Catalogs) -> Result<()> {
    let result = check(
        &catalogs.config,
        &CheckArgs {
            locales: vec![String::from("not a locale")],
        },
        &mut Vec::new(),
    );
    ensure!(
        matches!(result, Err(CliError::InvalidLocale { ref value, .. }) if value == "not a locale"),
        "unexpected result {result:?}"
    );
    Ok(())
}
