use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_json_hints(err);
        collector.collect_forge_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use std::io::ErrorKind;

        let Some(io_err) = err.downcast_ref::<std::io::Error>() else {
            return;
        };

        self.mark_typed();

        match io_err.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: the output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            ErrorKind::WriteZero | ErrorKind::StorageFull => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_json_hints(&mut self, err: &Error) {
        use serde_json::error::Category;

        let Some(json_err) = err.downcast_ref::<serde_json::Error>() else {
            return;
        };

        self.mark_typed();

        match json_err.classify() {
            Category::Syntax | Category::Eof => {
                self.add(format!(
                    "Malformed JSON near line {}, column {}",
                    json_err.line(),
                    json_err.column()
                ));
                self.add("The file may be truncated or not a network written by fforge");
            }
            Category::Data => {
                self.add("JSON is valid but does not describe a network");
                self.add("Expected fields: domain, beads, bonds, angles");
            }
            Category::Io => {
                self.add("Reading the JSON input failed");
            }
        }
    }

    fn collect_forge_hints(&mut self, err: &Error) {
        use fibre_forge::ForgeError;

        let Some(forge_err) = err.downcast_ref::<ForgeError>() else {
            return;
        };

        self.mark_typed();

        match forge_err {
            ForgeError::ConfigParse(_) => {
                self.add("Configuration file has invalid TOML or unknown values");
                self.add("Sections: [domain], [strands], [placement], [crosslink]");
                self.add("Placement kinds: uniform, directional, deterministic");
                self.add("Crosslink kinds: none, density, tip-to-tail");
            }

            ForgeError::InvalidParameter { parameter, .. } => {
                self.add(format!("Parameter '{}' is out of range", parameter));
                self.collect_parameter_hints(parameter);
            }

            ForgeError::ConflictingTypeParameters {
                category,
                type_name,
                ..
            } => {
                self.add(format!(
                    "Both networks define {} type '{}' with different constants",
                    category, type_name
                ));
                self.add("Regenerate one network with matching crosslink settings");
                self.add(
                    "Or pass --legacy-conflict-check to accept partial agreement",
                );
            }

            ForgeError::InvalidCrosslinkCandidate { bead_count, .. } => {
                self.add(format!(
                    "A crosslink referenced a bead outside the network ({} beads)",
                    bead_count
                ));
                self.add("Check that the crosslinker matches the strand layout");
            }
        }
    }

    fn collect_parameter_hints(&mut self, parameter: &str) {
        match parameter {
            "beads_per_strand" => {
                self.add("Every strand needs at least 2 beads (--beads)");
            }
            "contour_length" => {
                self.add("Use a positive, finite --contour-length");
            }
            "max_radius" | "bin_size" => {
                self.add("Crosslink radius and bin size must be positive");
                self.add("Use --no-crosslinks to skip crosslinking");
            }
            "concentration" => {
                self.add("Von Mises concentration must be zero or positive");
            }
            "extent_x" | "extent_y" => {
                self.add("Domain sizes must be positive (--size-x, --size-y)");
            }
            "strand_count" => {
                self.add("Check the number of strands requested");
            }
            _ => {}
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|e| e.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
