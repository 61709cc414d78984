//! # Error Suggestions
//!
//! Helpers that turn library errors into CLI errors carrying `hint:` lines,
//! so a failed run says what went wrong and how to fix it.
//!
//! ```rust,ignore
//! // Instead of:
//! anyhow::bail!("Host not found: {}", name);
//!
//! // Use:
//! return Err(suggestions::host_not_found(name, &known_hosts));
//! ```

use std::path::Path;

use crate::defaults::{ENV_INVENTORY, MARKER_FILE_NAMES};

/// Error for an inventory path that does not exist or is not usable.
pub fn inventory_not_found(path: &Path, reason: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Inventory not found: {path}\n\
         error: {reason}\n\n\
         hint: Pass -i/--inventory with a directory or a {marker} file\n\
         hint: Set the {env} environment variable",
        path = path.display(),
        marker = MARKER_FILE_NAMES[0],
        env = ENV_INVENTORY,
    )
}

/// Error for `host NAME` when the inventory has no such host.
///
/// Suggests the closest known host name when one is near enough.
pub fn host_not_found(name: &str, known_hosts: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, known_hosts)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Host not found: {name}{did_you_mean}\n\n\
         hint: Host names carry their directory prefix, e.g. 'dc1-web1'\n\
         hint: Run 'yaml-folder list --format canonical' to see all hosts"
    )
}

/// Error for an invocation with neither a subcommand nor `--list`/`--host`.
pub fn no_command() -> anyhow::Error {
    anyhow::anyhow!(
        "No command given\n\n\
         hint: Use --list or --host <NAME> for the dynamic inventory protocol\n\
         hint: Run 'yaml-folder --help' to see all commands"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            (distance <= 2 && distance < input.len()).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, two rows at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
