//! `commit-scout search` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::credentials::{self, KeyStore};
use crate::pipeline::{CommitAnalysis, CorpusSource, Pipeline, PipelineState, SearchRequest};
use crate::sample;

/// Execute the `search` command.
///
/// # Errors
///
/// Returns an error string when the log file cannot be read, the async
/// runtime cannot start, or the pipeline ends in its error state.
pub fn run(
    query: &str,
    repo: &str,
    log_file: Option<&Path>,
    sample: bool,
    api_key: Option<&str>,
) -> Result<(), String> {
    let source = corpus_source(repo, log_file, sample)?;

    let store = KeyStore::new(&credentials::store_root());
    let key = credentials::resolve(api_key, &store).map_or_else(String::new, |(key, _)| key);

    let ctx = ServiceContext::live();
    let mut pipeline = Pipeline::new(&ctx, key).with_observer(report_progress);
    let request = SearchRequest { query: query.to_string(), source };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(async {
        pipeline.run(&request).await;
    });

    if let Some(keywords) = pipeline.keywords() {
        println!("Search keywords: {keywords}");
    }
    if pipeline.corpus_truncated() {
        println!("Note: the log exceeded the analysis budget; only the first part was analyzed.");
    }

    match pipeline.state() {
        PipelineState::Results(analyses) if analyses.is_empty() => {
            println!("No matching commits found for your criteria.");
            Ok(())
        }
        PipelineState::Results(analyses) => {
            print_results(analyses);
            Ok(())
        }
        PipelineState::Error(message) => Err(message.clone()),
        // run() always ends in Results or Error.
        state => Err(format!("pipeline ended in unexpected state: {state:?}")),
    }
}

fn report_progress(state: &PipelineState) {
    match state {
        PipelineState::FetchingRemote => {
            println!("Optimizing query and fetching candidate commits...");
        }
        PipelineState::Analyzing => println!("Analyzing commit relevance..."),
        _ => {}
    }
}

fn corpus_source(repo: &str, log_file: Option<&Path>, sample: bool) -> Result<CorpusSource, String> {
    if sample {
        return Ok(CorpusSource::Local { log: sample::SAMPLE_GIT_LOG.to_string() });
    }
    match log_file {
        Some(path) => {
            let log = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read log file {}: {e}", path.display()))?;
            Ok(CorpusSource::Local { log })
        }
        None => Ok(CorpusSource::Remote { repo: repo.to_string() }),
    }
}

fn print_results(analyses: &[CommitAnalysis]) {
    println!("Top {} relevant commits:\n", analyses.len());
    for (rank, analysis) in analyses.iter().enumerate() {
        println!("#{} [score {:>3}] {}", rank + 1, analysis.relevance_score, analysis.commit_hash);
        println!("    Author: {}", analysis.author);
        if let Some(date) = &analysis.date {
            println!("    Date:   {date}");
        }
        println!("    {}", analysis.subject);
        println!("    Reasoning: {}", analysis.reasoning);
        if let Some(url) = &analysis.url {
            println!("    Link:   {url}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_fails_before_any_network_call() {
        let result = run("   ", "torvalds/linux", None, true, None);
        assert!(result.unwrap_err().contains("search query"));
    }

    #[test]
    fn missing_log_file_is_reported() {
        let missing = Path::new("/nonexistent/scout.log");
        let result = run("query", "torvalds/linux", Some(missing), false, None);
        assert!(result.unwrap_err().contains("failed to read log file"));
    }

    #[test]
    fn sample_flag_selects_the_builtin_log() {
        let source = corpus_source("torvalds/linux", None, true).unwrap();
        match source {
            CorpusSource::Local { log } => assert!(log.contains("bpf: fix use-after-free")),
            CorpusSource::Remote { .. } => panic!("expected the local sample"),
        }
    }

    #[test]
    fn no_flags_selects_the_remote_source() {
        let source = corpus_source("rust-lang/rust", None, false).unwrap();
        assert_eq!(source, CorpusSource::Remote { repo: "rust-lang/rust".to_string() });
    }

    #[test]
    fn log_file_contents_become_the_corpus() {
        let dir = std::env::temp_dir().join("scout_search_log_file");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("history.log");
        std::fs::write(&path, "commit abc123\n    fix things\n").unwrap();

        let source = corpus_source("torvalds/linux", Some(&path), false).unwrap();
        match source {
            CorpusSource::Local { log } => assert!(log.contains("commit abc123")),
            CorpusSource::Remote { .. } => panic!("expected the local log"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
