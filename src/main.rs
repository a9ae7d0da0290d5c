use anyhow::Result;
use clap::Parser;
use stance_bayes::{config::Args, corpus, experiment};

fn main() -> Result<()> {
    let args = Args::parse();
    let outcome = experiment::run(&args)?;

    if args.verbose {
        eprintln!("Trained on {} records ({} neutral skipped)", outcome.trained, outcome.skipped);
        eprintln!("Distinct features: {}", outcome.distinct_features);
        eprintln!("Evaluated {} records", outcome.evaluation.evaluated());
    }

    print!("{}", outcome.evaluation.render(&outcome.classes));

    if let Some(path) = &args.predictions {
        corpus::write_predictions(path, &outcome.predictions)?;
        if args.verbose {
            eprintln!("Wrote predictions to {}", path.display());
        }
    }

    Ok(())
}
