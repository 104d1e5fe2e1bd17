use anyhow::{bail, Context};
use colored::Colorize;

use rho_io::{render_value, RenderOptions};
use rho_store::{DataStore, STORE_DIR_NAME};
use rho_types::{TensorData, Value};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.store {
        Some(dir) => dir,
        None => std::env::current_dir()?.join(STORE_DIR_NAME),
    };
    let store = DataStore::open(root);

    match cli.command {
        Command::Ls => cmd_ls(&store),
        Command::Show(args) => cmd_show(&store, args),
        Command::Import(args) => cmd_import(&store, args),
        Command::Export(args) => cmd_export(&store, args),
        Command::Rm(args) => cmd_rm(&store, args),
        Command::Describe(args) => cmd_describe(&store, args),
    }
}

fn cmd_ls(store: &DataStore) -> anyhow::Result<()> {
    let keys = store.list()?;
    if keys.is_empty() {
        println!("(no saved values)");
        return Ok(());
    }
    for key in keys {
        let kind = match store.load(&key) {
            Ok(value) => value.type_tag().to_string(),
            Err(_) => "unreadable".to_string(),
        };
        println!("{}  {}", key.bold(), kind.dimmed());
    }
    Ok(())
}

fn cmd_show(store: &DataStore, args: ShowArgs) -> anyhow::Result<()> {
    let value = store.load(&args.name)?;
    let opts = if args.full {
        RenderOptions { max_rows: None }
    } else {
        RenderOptions::default()
    };
    print!("{}", render_value(&value, &opts));
    Ok(())
}

fn cmd_import(store: &DataStore, args: ImportArgs) -> anyhow::Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => args
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("cannot derive a name from the file path; pass --name")?
            .to_string(),
    };
    let table = rho_io::read_csv(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let (rows, cols) = table.shape();
    store.save(&Value::Table(table), &name)?;
    println!(
        "{} imported {} ({rows} rows x {cols} columns)",
        "✓".green(),
        name.bold()
    );
    Ok(())
}

fn cmd_export(store: &DataStore, args: ExportArgs) -> anyhow::Result<()> {
    let value = store.load(&args.name)?;
    let table = match value {
        Value::Table(t) => t,
        Value::Column(c) => rho_types::Table::from_column(c),
        Value::Tensor(_) => bail!("{:?} is a tensor; only tables and columns export to CSV", args.name),
    };
    rho_io::write_csv(&table, &args.path)
        .with_context(|| format!("writing {}", args.path.display()))?;
    println!("{} exported {} to {}", "✓".green(), args.name.bold(), args.path.display());
    Ok(())
}

fn cmd_rm(store: &DataStore, args: RmArgs) -> anyhow::Result<()> {
    store.remove(&args.name)?;
    println!("{} removed {}", "✓".green(), args.name.bold());
    Ok(())
}

fn cmd_describe(store: &DataStore, args: DescribeArgs) -> anyhow::Result<()> {
    let value = store.load(&args.name)?;
    let series: Vec<(String, Vec<f64>)> = match &value {
        Value::Table(t) => t
            .columns()
            .iter()
            .filter(|c| c.data().is_numeric())
            .map(|c| (c.name().unwrap_or("<unnamed>").to_string(), c.to_f64s()))
            .map(|(name, r)| r.map(|v| (name, v)))
            .collect::<Result<_, _>>()?,
        Value::Column(c) => match c.to_f64s() {
            Ok(v) => vec![(c.name().unwrap_or("<unnamed>").to_string(), v)],
            Err(_) => vec![],
        },
        Value::Tensor(t) => vec![("elements".to_string(), tensor_f64s(t.data()))],
    };
    if series.is_empty() {
        println!("{:?} has no numeric columns", args.name);
        return Ok(());
    }
    for (name, xs) in series {
        print_summary(&name, &xs);
    }
    Ok(())
}

fn print_summary(name: &str, xs: &[f64]) {
    println!("{}", name.bold());
    println!("  count   {}", xs.len());
    let stat = |r: Result<f64, rho_stats::StatsError>| match r {
        Ok(v) => v.to_string(),
        Err(e) => format!("n/a ({e})"),
    };
    println!("  mean    {}", stat(rho_stats::mean(xs)));
    println!("  std     {}", stat(rho_stats::std_dev(xs, 1)));
    println!("  min     {}", stat(rho_stats::min(xs)));
    println!("  median  {}", stat(rho_stats::median(xs)));
    println!("  max     {}", stat(rho_stats::max(xs)));
}

fn tensor_f64s(data: &TensorData) -> Vec<f64> {
    match data {
        TensorData::F64(v) => v.clone(),
        TensorData::F32(v) => v.iter().map(|x| *x as f64).collect(),
        TensorData::I64(v) => v.iter().map(|x| *x as f64).collect(),
        TensorData::I32(v) => v.iter().map(|x| *x as f64).collect(),
    }
}
