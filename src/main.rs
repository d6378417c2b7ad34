//! swiftstrip - Comment remover for Swift source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use swiftstrip::process::strip_file;
use swiftstrip::{parse_args, CliArgs, Config, Result};
use walkdir::WalkDir;

/// Swift file extensions to process
const SWIFT_EXTENSIONS: &[&str] = &["swift"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args, base_config.as_ref());

    if files.is_empty() {
        if !args.silent {
            eprintln!("No Swift files found to process.");
        }
        return Ok(());
    }

    // Process files
    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        // Sequential processing for stdout or --jobs 1
        process_files_sequential(&files, base_config.as_ref(), &args);
    } else {
        // Parallel processing for in-place stripping
        process_files_parallel(&files, base_config.as_ref(), &args);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if args.keep_doc_comments {
        config.keep_doc_comments = true;
    }
    if args.keep_header {
        config.keep_header = true;
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   keep_doc_comments: {}", config.keep_doc_comments);
        eprintln!("[DEBUG]   keep_header: {}", config.keep_header);
        if !config.extensions.is_empty() {
            eprintln!("[DEBUG]   extensions: {:?}", config.extensions);
        }
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs, base_config: Option<&Config>) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    // Custom Swift extensions from CLI plus any from an explicit config
    let mut custom_extensions = args.swift_extensions.clone();
    if let Some(config) = base_config {
        custom_extensions.extend(config.extensions.iter().cloned());
    }

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_swift_file(path, &custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_swift_file(&path, &custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)] // Simple use case, no need for bytecount crate
fn count_lines(contents: &[u8]) -> usize {
    // Count newlines; add 1 if file doesn't end with newline and has content
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a Swift extension
/// Checks against both default extensions and any custom extensions provided
fn is_swift_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if SWIFT_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        if let Err(e) = file_result {
            eprintln!("Error processing {}: {}", path.display(), e);
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Processed {success} files successfully.");
        } else {
            eprintln!("Processed {success} files, {errors} errors.");
        }
    }
}

/// Process a single file
fn process_single_file(path: &PathBuf, config: &Config, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(());
    }

    // Read input file into memory
    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    // Check line count limit if specified
    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(());
        }
    }

    if !args.silent && !args.stdout {
        eprintln!("Processing: {}", path.display());
    }

    // Strip the file
    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    strip_file(reader, &mut output, config)?;

    // Output results
    if args.stdout {
        io::stdout().write_all(&output)?;
    } else {
        // Write back to file (in-place)
        std::fs::write(path, &output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Strip the input
    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    strip_file(reader, &mut output, config)?;

    // Always output to stdout when reading from stdin
    io::stdout().write_all(&output)?;

    if !args.silent {
        eprintln!("Processed stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "swiftstrip v{} - Swift comment remover",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Removes comments from Swift source code without touching anything else.");
    println!();
    println!("Usage:");
    println!("  swiftstrip [OPTIONS] <FILE>...");
    println!("  swiftstrip [OPTIONS] -r <DIRECTORY>");
    println!("  swiftstrip [OPTIONS] -              # Read from stdin");
    println!("  cat file.swift | swiftstrip         # Pipe input");
    println!();
    println!("Examples:");
    println!("  swiftstrip file.swift               # Strip single file in-place");
    println!("  swiftstrip *.swift                  # Strip multiple files");
    println!("  swiftstrip -r Sources/              # Recursively strip a directory");
    println!("  swiftstrip --stdout file.swift      # Output to stdout");
    println!("  swiftstrip --keep-doc-comments -r . # Keep /// and /** */ comments");
    println!();
    println!("Options:");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --extension <EXT>           Additional Swift extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>   Skip files with more than NUM lines");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  --keep-doc-comments             Keep /// and /** */ documentation comments");
    println!("  --keep-header                   Keep leading license-header comments");
    println!("  -D, --debug                     Enable debug output");
    println!("  -S, --silent                    Silent mode");
    println!("  -h, --help                      Print help");
    println!();
    println!("Supported extension: .swift (add more with -x or the config file)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for swiftstrip.toml in parent directories");
    println!("  starting from the file being processed up to the root directory.");
    println!("  Also checks swiftstrip.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
