mod args;
mod report;

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::info;

use qualname::naming::{declared_names, NameTable};
use qualname::source::Source;
use qualname::visualize::NestingVisualizer;
use qualname::{Database, Messages, QualifiedName};

use args::{Arguments, Command, Sources};
use report::ConsoleReporter;

fn main() -> Result<()> {
    env_logger::init();

    let args = Arguments::parse();
    let db = Database::default();
    let mut reporter = ConsoleReporter::new();

    match args.command {
        Command::Names(sources) => names(&db, &mut reporter, &sources),
        Command::Find { name, sources } => find(&db, &mut reporter, &name, &sources),
        Command::Check { names } => check(&names),
        Command::Dot { path } => graph(&db, &mut reporter, &path),
    }
}

/// Name the declarations of a file, reporting any diagnostics.
fn load<'db>(
    db: &'db Database,
    reporter: &mut ConsoleReporter,
    path: &Path,
) -> Result<(Source, &'db NameTable)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    let name = path.display().to_string();

    info!("loaded {name}");

    let file = reporter.add(name.clone(), text.clone());
    let source = Source::new(db, text, name);

    let table = declared_names(db, source);
    let messages = declared_names::accumulated::<Messages>(db, source)
        .into_iter()
        .map(|message| message.0.clone());

    let errors = reporter.report(file, messages)?;
    if errors > 0 {
        info!("{errors} errors in {}", path.display());
    }

    Ok((source, table))
}

fn names(db: &Database, reporter: &mut ConsoleReporter, sources: &Sources) -> Result<()> {
    for path in sources.paths.iter() {
        let (source, table) = load(db, reporter, path)?;
        let text = source.text(db);

        for declaration in table.iter() {
            println!(
                "{}:{}: {} {}",
                path.display(),
                declaration.span.line(text),
                declaration.kind,
                declaration.name
            );
        }
    }

    Ok(())
}

fn find(
    db: &Database,
    reporter: &mut ConsoleReporter,
    name: &str,
    sources: &Sources,
) -> Result<()> {
    let name = QualifiedName::parse(name)
        .ok_or_else(|| anyhow!("`{name}` is not a well-formed qualified name"))?;

    let mut found = false;
    for path in sources.paths.iter() {
        let (source, table) = load(db, reporter, path)?;
        let text = source.text(db);

        for declaration in table.find(&name) {
            found = true;
            println!(
                "{}:{}: {}",
                path.display(),
                declaration.span.line(text),
                declaration.kind
            );
        }
    }

    if !found {
        bail!("`{name}` is not declared in any of the given files");
    }

    Ok(())
}

fn check(names: &[String]) -> Result<()> {
    let mut malformed = 0;

    for text in names {
        let Some(name) = QualifiedName::parse(text) else {
            println!("{text}: malformed");
            malformed += 1;
            continue;
        };

        println!("{text}:");
        println!("  packages:  {}", name.packages().iter().join("."));
        println!("  classes:   {}", name.classes().iter().join(" $ "));

        if let Some(operation) = name.operation() {
            println!("  operation: {operation}");
        }

        let kinds = [
            (name.is_local_class(), "local class"),
            (name.is_anonymous_class(), "anonymous class"),
            (name.is_lambda(), "lambda"),
        ];

        let kinds = kinds
            .iter()
            .filter_map(|(holds, kind)| holds.then_some(*kind))
            .join(", ");

        if !kinds.is_empty() {
            println!("  kind:      {kinds}");
        }
    }

    if malformed > 0 {
        bail!("{malformed} of {} names are malformed", names.len());
    }

    Ok(())
}

fn graph(db: &Database, reporter: &mut ConsoleReporter, path: &Path) -> Result<()> {
    let (_, table) = load(db, reporter, path)?;
    let visualizer = NestingVisualizer::new(table);

    dot::render(&visualizer, &mut io::stdout().lock())?;
    Ok(())
}
