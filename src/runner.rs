use crate::config::Config;
use crate::error::{EtlError, Result};
use crate::metrics::PipelineMetrics;
use crate::output::OutputPaths;
use crate::pipeline::sink::NdjsonSink;
use crate::pipeline::RowPipeline;
use crate::types::{BatchContext, RunSummary};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

/// Options for one run, taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub print_lines: bool,
}

/// Split `options.input` into the accepted and rejected files.
///
/// The input and both outputs are opened before any row is read; failing to
/// open any of them aborts the run without processing.
#[instrument(skip(config), fields(input = %options.input.display()))]
pub fn run(options: &RunOptions, config: &Config) -> Result<RunSummary> {
    let context = BatchContext::new(config.tags.clone());
    run_with_context(options, config, &context)
}

pub fn run_with_context(
    options: &RunOptions,
    config: &Config,
    context: &BatchContext,
) -> Result<RunSummary> {
    let started = Instant::now();
    info!(batch_id = context.batch_id(), "Starting run");

    let paths = OutputPaths::for_input(
        &options.input,
        config.output.dir.as_deref(),
        context.started_at().date_naive(),
    );

    let input = File::open(&options.input).map_err(|source| EtlError::OpenInput {
        path: options.input.clone(),
        source,
    })?;
    if let Some(dir) = &config.output.dir {
        fs::create_dir_all(dir).map_err(|source| EtlError::CreateOutput {
            path: dir.clone(),
            source,
        })?;
    }
    let ok_file = create_output(&paths.accepted)?;
    let reject_file = create_output(&paths.rejected)?;

    let mut pipeline = RowPipeline::new(
        context,
        NdjsonSink::new("accepted", BufWriter::new(ok_file)),
        NdjsonSink::new("rejected", BufWriter::new(reject_file)),
    );
    if options.print_lines {
        pipeline = pipeline.with_echo(io::stdout());
    }
    pipeline.run(BufReader::new(input))?;
    let (counters, ok_sink, reject_sink) = pipeline.finish()?;
    sync_output(ok_sink)?;
    sync_output(reject_sink)?;

    let summary = RunSummary {
        batch_id: context.batch_id().to_string(),
        counters,
        accepted_file: paths.accepted.display().to_string(),
        rejected_file: paths.rejected.display().to_string(),
        duration_secs: started.elapsed().as_secs_f64(),
    };
    PipelineMetrics::record_run(&summary);
    info!(
        batch_id = %summary.batch_id,
        lines_read = counters.lines_read,
        accepted = counters.accepted,
        rejected = counters.rejected,
        accepted_file = %summary.accepted_file,
        rejected_file = %summary.rejected_file,
        "Run finished"
    );
    Ok(summary)
}

/// Flush the buffer and force the file contents to disk.
fn sync_output(sink: NdjsonSink<BufWriter<File>>) -> Result<()> {
    let name = sink.name();
    let file = sink.into_inner().into_inner().map_err(|e| EtlError::Write {
        sink: name,
        source: e.into_error(),
    })?;
    file.sync_all()
        .map_err(|source| EtlError::Write { sink: name, source })
}

fn create_output(path: &Path) -> Result<File> {
    info!("Creating output file: {}", path.display());
    File::create(path).map_err(|source| EtlError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}
