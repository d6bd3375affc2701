//! Staged-diff segmentation and exclusion filtering.
//!
//! Splits a raw `git diff --cached` blob into per-file units, classifies each
//! unit by path against the configured exclusion rules, and reassembles the
//! kept units into a size-bounded payload for the engine.

use std::collections::BTreeSet;

use crate::config::FilterConfig;

/// Appended to the payload when it gets cut at `max_payload_chars`.
pub const TRUNCATION_MARKER: &str = "\n# ... diff truncated";

const FILE_HEADER: &str = "diff --git ";

/// Result of one [`process`] call.
///
/// `included` and `excluded` are sorted and deduplicated; the payload keeps
/// the units in their original order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDiff {
   pub included: Vec<String>,
   pub excluded: Vec<String>,
   pub payload:  String,
}

/// Segment `diff` into per-file units and filter them through `config`.
///
/// Never fails: an empty or unparsable diff degrades to empty path lists and
/// an empty payload. Classification looks only at the path taken from the
/// `diff --git a/<src> b/<dst>` header line, never at unit content.
pub fn process(diff: &str, config: &FilterConfig) -> ProcessedDiff {
   let mut included: BTreeSet<String> = BTreeSet::new();
   let mut excluded: BTreeSet<String> = BTreeSet::new();
   let mut kept: Vec<String> = Vec::new();

   for (i, part) in diff.split("\ndiff --git ").enumerate() {
      let unit = if i == 0 {
         part.to_string()
      } else {
         format!("{FILE_HEADER}{part}")
      };

      // Units without a parseable header are dropped, not reported
      let Some(path) = extract_file_path(&unit) else {
         continue;
      };

      if is_excluded(&path, config) {
         excluded.insert(path);
         continue;
      }

      included.insert(path);
      kept.push(unit);
   }

   let mut payload = kept.join("\n").trim().to_string();
   if payload.chars().count() > config.max_payload_chars {
      payload = payload.chars().take(config.max_payload_chars).collect();
      payload.push_str(TRUNCATION_MARKER);
   }

   ProcessedDiff {
      included: included.into_iter().collect(),
      excluded: excluded.into_iter().collect(),
      payload,
   }
}

/// Pull the destination-side path out of the first line in `unit` matching
/// `diff --git a/<src> b/<dst>`. Both sides must be non-empty.
fn extract_file_path(unit: &str) -> Option<String> {
   for line in unit.lines() {
      let Some(rest) = line.strip_prefix("diff --git a/") else {
         continue;
      };
      let Some((src, dst)) = rest.split_once(" b/") else {
         continue;
      };
      if src.is_empty() || dst.is_empty() {
         continue;
      }

      // git repeats the real path on this header line even for deletions, but
      // a hand-written diff can carry /dev/null; report the source path then
      if dst == "/dev/null" {
         return Some(src.to_string());
      }

      return Some(dst.to_string());
   }

   None
}

/// Exclusion rules are OR-combined and case-sensitive; backslashes are
/// normalized to forward slashes before matching.
fn is_excluded(file_path: &str, config: &FilterConfig) -> bool {
   let path = file_path.replace('\\', "/");
   let filename = path.rsplit('/').next().unwrap_or(&path);

   if config.excluded_file_names.iter().any(|name| name == filename) {
      return true;
   }

   if config
      .excluded_suffixes
      .iter()
      .any(|suffix| path.ends_with(suffix.as_str()))
   {
      return true;
   }

   config.excluded_dir_prefixes.iter().any(|dir| {
      path.starts_with(dir.as_str()) || path.contains(&format!("/{dir}"))
   })
}

#[cfg(test)]
mod tests {
   use super::*;

   fn test_config() -> FilterConfig {
      FilterConfig::default()
   }

   fn unit_for(path: &str) -> String {
      format!(
         "diff --git a/{path} b/{path}\nindex 123..456 100644\n--- a/{path}\n+++ \
          b/{path}\n@@ -1,1 +1,2 @@\n fn main() {{}}\n+fn helper() {{}}"
      )
   }

   #[test]
   fn test_process_empty_diff() {
      let result = process("", &test_config());
      assert!(result.included.is_empty());
      assert!(result.excluded.is_empty());
      assert!(result.payload.is_empty());
   }

   #[test]
   fn test_process_whitespace_only_diff() {
      let result = process("  \n\t\n  ", &test_config());
      assert!(result.included.is_empty());
      assert!(result.excluded.is_empty());
      assert!(result.payload.is_empty());
   }

   #[test]
   fn test_process_no_file_headers() {
      let result = process("just some text\nthat is not a diff\n", &test_config());
      assert!(result.included.is_empty());
      assert!(result.excluded.is_empty());
      assert!(result.payload.is_empty());
   }

   #[test]
   fn test_process_single_included_file() {
      let diff = unit_for("src/main.rs");
      let result = process(&diff, &test_config());
      assert_eq!(result.included, vec!["src/main.rs"]);
      assert!(result.excluded.is_empty());
      assert!(result.payload.contains("diff --git a/src/main.rs"));
      assert!(result.payload.contains("+fn helper()"));
   }

   #[test]
   fn test_process_classification_scenario() {
      let diff = format!(
         "{}\n{}\n{}",
         unit_for("node_modules/react/index.js"),
         unit_for("package-lock.json"),
         unit_for("src/main.go")
      );
      let result = process(&diff, &test_config());
      assert_eq!(result.included, vec!["src/main.go"]);
      assert_eq!(result.excluded, vec!["node_modules/react/index.js", "package-lock.json"]);
      assert!(result.payload.contains("src/main.go"));
      assert!(!result.payload.contains("node_modules"));
      assert!(!result.payload.contains("package-lock.json"));
   }

   #[test]
   fn test_process_sets_are_disjoint_and_complete() {
      let paths = ["src/a.rs", "yarn.lock", "docs/guide.md", "dist/bundle.js"];
      let diff = paths.iter().map(|p| unit_for(p)).collect::<Vec<_>>().join("\n");
      let result = process(&diff, &test_config());

      for path in paths {
         let in_included = result.included.iter().any(|p| p == path);
         let in_excluded = result.excluded.iter().any(|p| p == path);
         assert!(in_included ^ in_excluded, "{path} must land in exactly one set");
      }
   }

   #[test]
   fn test_process_payload_keeps_appearance_order() {
      let diff = format!("{}\n{}", unit_for("src/zzz.rs"), unit_for("src/aaa.rs"));
      let result = process(&diff, &test_config());

      // Reported paths are sorted, payload content is not
      assert_eq!(result.included, vec!["src/aaa.rs", "src/zzz.rs"]);
      let zzz = result.payload.find("src/zzz.rs").unwrap();
      let aaa = result.payload.find("src/aaa.rs").unwrap();
      assert!(zzz < aaa);
   }

   #[test]
   fn test_process_deduplicates_paths() {
      let diff = format!("{}\n{}", unit_for("src/main.rs"), unit_for("src/main.rs"));
      let result = process(&diff, &test_config());
      assert_eq!(result.included, vec!["src/main.rs"]);
      // Both units still contribute content
      assert_eq!(result.payload.matches("diff --git").count(), 2);
   }

   #[test]
   fn test_process_drops_unparsable_header() {
      let diff = "diff --git malformed-header-no-paths\nindex 123..456\n+something";
      let result = process(diff, &test_config());
      assert!(result.included.is_empty());
      assert!(result.excluded.is_empty());
      assert!(result.payload.is_empty());
   }

   #[test]
   fn test_process_idempotent() {
      let diff = format!("{}\n{}", unit_for("src/main.rs"), unit_for("yarn.lock"));
      let config = test_config();
      let first = process(&diff, &config);
      let second = process(&diff, &config);
      assert_eq!(first, second);
   }

   #[test]
   fn test_process_truncates_to_exact_length() {
      let config = FilterConfig { max_payload_chars: 80, ..FilterConfig::default() };
      let diff = unit_for("src/main.rs");
      let result = process(&diff, &config);

      assert!(result.payload.ends_with(TRUNCATION_MARKER));
      let body = result.payload.strip_suffix(TRUNCATION_MARKER).unwrap();
      assert_eq!(body.chars().count(), 80);
   }

   #[test]
   fn test_process_no_marker_under_limit() {
      let result = process(&unit_for("src/main.rs"), &test_config());
      assert!(!result.payload.contains(TRUNCATION_MARKER.trim_start()));
   }

   #[test]
   fn test_exclude_by_filename_at_any_depth() {
      let result = process(&unit_for("backend/deps/package-lock.json"), &test_config());
      assert_eq!(result.excluded, vec!["backend/deps/package-lock.json"]);
   }

   #[test]
   fn test_exclude_by_suffix() {
      let result = process(&unit_for("assets/app.min.js"), &test_config());
      assert_eq!(result.excluded, vec!["assets/app.min.js"]);
   }

   #[test]
   fn test_exclude_dir_prefix_at_root() {
      let result = process(&unit_for("dist/app.js"), &test_config());
      assert_eq!(result.excluded, vec!["dist/app.js"]);
   }

   #[test]
   fn test_exclude_dir_prefix_nested() {
      let result = process(&unit_for("packages/web/node_modules/left-pad/index.js"), &test_config());
      assert_eq!(result.excluded, vec!["packages/web/node_modules/left-pad/index.js"]);
   }

   #[test]
   fn test_exclusion_is_case_sensitive() {
      let result = process(&unit_for("Dist/app.js"), &test_config());
      assert_eq!(result.included, vec!["Dist/app.js"]);
      assert!(result.excluded.is_empty());
   }

   #[test]
   fn test_backslash_paths_normalized_for_matching() {
      let result = process(&unit_for(r"node_modules\react\index.js"), &test_config());
      assert_eq!(result.excluded, vec![r"node_modules\react\index.js"]);
   }

   #[test]
   fn test_extract_path_takes_destination_side() {
      let diff = "diff --git a/old_name.rs b/new_name.rs\nsimilarity index 95%\nrename from \
                  old_name.rs\nrename to new_name.rs";
      let result = process(diff, &test_config());
      assert_eq!(result.included, vec!["new_name.rs"]);
   }

   #[test]
   fn test_extract_path_dev_null_falls_back_to_source() {
      let diff = "diff --git a/gone.rs b//dev/null\ndeleted file mode 100644\n--- a/gone.rs\n+++ \
                  /dev/null";
      let result = process(diff, &test_config());
      assert_eq!(result.included, vec!["gone.rs"]);
   }

   #[test]
   fn test_header_not_on_first_line_still_matches() {
      // Leading junk before the first header ends up in unit zero
      let diff = format!("stray warning line\n{}", unit_for("src/lib.rs"));
      let result = process(&diff, &test_config());
      assert_eq!(result.included, vec!["src/lib.rs"]);
   }
}
