use anyhow::Result;
use chrono::Utc;
use std::future::Future;

/// Maximum number of slug candidates probed before giving up on pretty
/// slugs and falling back to a timestamp suffix.
pub const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Derive a URL-safe base slug from a display name.
///
/// Lowercases the name, collapses every run of non-`[a-z0-9]` characters
/// into a single hyphen, and trims leading/trailing hyphens. Names that
/// normalize to nothing (all punctuation) fall back to `"tool"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "tool".to_string()
    } else {
        slug
    }
}

/// Find a slug that is not currently taken.
///
/// Probes `base`, then `base-2`, `base-3`, ... up to [`MAX_SLUG_ATTEMPTS`]
/// candidates. Under pathological contention the probe loop terminates by
/// falling back to `base-<unix-ms>`, accepted unconditionally: the slug is
/// ugly, but approval never livelocks.
///
/// The probe-then-insert sequence is not atomic; the caller must still treat
/// a unique-constraint violation at insert time as a retryable conflict.
pub async fn allocate_slug<F, Fut>(base: &str, mut taken: F) -> Result<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let candidate = if attempt == 1 {
            base.to_string()
        } else {
            format!("{}-{}", base, attempt)
        };
        if !taken(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
    Ok(format!("{}-{}", base, Utc::now().timestamp_millis()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Acme AI"), "acme-ai");
        assert_eq!(slugify("ChatGPT 4.5 (Preview)"), "chatgpt-4-5-preview");
        assert_eq!(slugify("  --Weird--Name--  "), "weird-name");
    }

    #[test]
    fn slugify_empty_input_falls_back() {
        assert_eq!(slugify("!!!"), "tool");
        assert_eq!(slugify(""), "tool");
    }

    #[tokio::test]
    async fn first_candidate_used_when_free() {
        let slug = allocate_slug("acme-ai", |_| async move { Ok(false) })
            .await
            .unwrap();
        assert_eq!(slug, "acme-ai");
    }

    #[tokio::test]
    async fn collision_probes_numeric_suffixes() {
        let taken: HashSet<String> = ["acme-ai", "acme-ai-2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let slug = allocate_slug("acme-ai", |s| {
            let hit = taken.contains(&s);
            async move { Ok(hit) }
        })
        .await
        .unwrap();
        assert_eq!(slug, "acme-ai-3");
    }

    #[tokio::test]
    async fn exactly_max_attempts_collisions_triggers_timestamp_fallback() {
        // base plus base-2 .. base-100 are all taken: every one of the 100
        // probes collides, so the allocator must fall back.
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert("tool".to_string());
        for n in 2..=MAX_SLUG_ATTEMPTS {
            taken.insert(format!("tool-{}", n));
        }

        let probes = std::cell::Cell::new(0u32);
        let slug = allocate_slug("tool", |s| {
            probes.set(probes.get() + 1);
            let hit = taken.contains(&s);
            async move { Ok(hit) }
        })
        .await
        .unwrap();

        assert_eq!(probes.get(), MAX_SLUG_ATTEMPTS);
        assert!(slug.starts_with("tool-"));
        let suffix = slug.trim_start_matches("tool-");
        // Timestamp fallback, not a probe counter
        assert!(suffix.parse::<i64>().unwrap() > 1_000_000_000_000);
    }

    #[tokio::test]
    async fn one_less_than_max_collisions_stays_numeric() {
        // base-100 is free, so the 100th probe succeeds without fallback.
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert("tool".to_string());
        for n in 2..MAX_SLUG_ATTEMPTS {
            taken.insert(format!("tool-{}", n));
        }

        let slug = allocate_slug("tool", |s| {
            let hit = taken.contains(&s);
            async move { Ok(hit) }
        })
        .await
        .unwrap();
        assert_eq!(slug, format!("tool-{}", MAX_SLUG_ATTEMPTS));
    }

    #[tokio::test]
    async fn probe_failure_propagates() {
        let result = allocate_slug("tool", |_| async move {
            Err(anyhow::anyhow!("store unreachable"))
        })
        .await;
        assert!(result.is_err());
    }
}
