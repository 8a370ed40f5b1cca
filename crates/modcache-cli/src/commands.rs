use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;

use modcache_core::cache::Identity;
use modcache_core::models::{AvatarSize, LogoSize, ModProfile};
use modcache_core::utils::{age_display, extract_youtube_id, format_timestamp, truncate_string};
use modcache_core::ModCache;

/// Width of the summary column in `list`
const SUMMARY_WIDTH: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { offset: usize },
    Count,
    Show { mod_id: i64 },
    Stats { mod_id: i64 },
    Team { mod_id: i64 },
    Files { mod_id: i64, modfile_id: i64 },
    User { user_id: i64 },
    Users,
    Evict { mod_id: i64 },
    EvictUser { user_id: i64 },
    Path,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command");
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("list", []) => Command::List { offset: 0 },
            ("list", [offset]) => Command::List {
                offset: offset
                    .parse()
                    .with_context(|| format!("invalid offset '{}'", offset))?,
            },
            ("count", []) => Command::Count,
            ("show", [id]) => Command::Show { mod_id: parse_id(id)? },
            ("stats", [id]) => Command::Stats { mod_id: parse_id(id)? },
            ("team", [id]) => Command::Team { mod_id: parse_id(id)? },
            ("files", [mod_id, modfile_id]) => Command::Files {
                mod_id: parse_id(mod_id)?,
                modfile_id: parse_id(modfile_id)?,
            },
            ("user", [id]) => Command::User { user_id: parse_id(id)? },
            ("users", []) => Command::Users,
            ("evict", [id]) => Command::Evict { mod_id: parse_id(id)? },
            ("evict-user", [id]) => Command::EvictUser { user_id: parse_id(id)? },
            ("path", []) => Command::Path,
            (
                "list" | "count" | "show" | "stats" | "team" | "files" | "user" | "users"
                | "evict" | "evict-user" | "path",
                _,
            ) => bail!("wrong number of arguments for '{}'", name),
            _ => bail!("unknown command '{}'", name),
        };
        Ok(command)
    }
}

fn parse_id(s: &str) -> Result<i64> {
    s.parse().with_context(|| format!("invalid id '{}'", s))
}

pub fn run(cache: &ModCache, command: &Command, out: &mut impl Write) -> Result<()> {
    match *command {
        Command::List { offset } => list(cache, offset, out),
        Command::Count => {
            writeln!(out, "{}", cache.count_mod_profiles())?;
            Ok(())
        }
        Command::Show { mod_id } => show(cache, mod_id, out),
        Command::Stats { mod_id } => stats(cache, mod_id, out),
        Command::Team { mod_id } => team(cache, mod_id, out),
        Command::Files { mod_id, modfile_id } => files(cache, mod_id, modfile_id, out),
        Command::User { user_id } => user(cache, user_id, out),
        Command::Users => users(cache, out),
        Command::Evict { mod_id } => {
            cache.delete_mod(mod_id)?;
            writeln!(out, "Evicted mod {}", mod_id)?;
            Ok(())
        }
        Command::EvictUser { user_id } => {
            cache.delete_user_profile(user_id)?;
            cache.delete_user_avatars(user_id)?;
            writeln!(out, "Evicted user {}", user_id)?;
            Ok(())
        }
        Command::Path => {
            writeln!(out, "{}", cache.root().display())?;
            Ok(())
        }
    }
}

fn list(cache: &ModCache, offset: usize, out: &mut impl Write) -> Result<()> {
    for profile in cache.iter_mod_profiles(offset) {
        writeln!(
            out,
            "{:>8}  {:<32}  {}",
            profile.id(),
            truncate_string(profile.name(), 32),
            truncate_string(profile.summary(), SUMMARY_WIDTH)
        )?;
    }
    Ok(())
}

fn load_profile(cache: &ModCache, mod_id: i64) -> Result<ModProfile> {
    cache
        .load_mod_profile(mod_id)
        .ok_or_else(|| anyhow!("mod {} is not cached", mod_id))
}

fn show(cache: &ModCache, mod_id: i64, out: &mut impl Write) -> Result<()> {
    let profile = load_profile(cache, mod_id)?;
    let raw = profile.raw();

    writeln!(out, "{} ({})", profile.name(), profile.name_id())?;
    writeln!(out, "  id:         {}", profile.id())?;
    match profile.status() {
        Some(status) => writeln!(out, "  status:     {}", status)?,
        None => writeln!(out, "  status:     unknown ({})", raw.status)?,
    }
    match profile.visibility() {
        Some(visibility) => writeln!(out, "  visibility: {}", visibility)?,
        None => writeln!(out, "  visibility: unknown ({})", raw.visible)?,
    }
    writeln!(out, "  added:      {}", format_timestamp(raw.date_added))?;
    writeln!(out, "  updated:    {}", format_timestamp(raw.date_updated))?;
    if let Some(homepage) = profile.homepage() {
        writeln!(out, "  homepage:   {}", homepage)?;
    }
    if !profile.tag_names().is_empty() {
        writeln!(out, "  tags:       {}", profile.tag_names().join(", "))?;
    }
    writeln!(out, "  summary:    {}", profile.summary())?;

    let media = profile.media();
    writeln!(
        out,
        "  media:      {} images, {} youtube, {} sketchfab",
        media.images.len(),
        media.youtube.len(),
        media.sketchfab.len()
    )?;
    for link in &media.youtube {
        match extract_youtube_id(link) {
            Some(id) => {
                let cached = cache.load_youtube_thumbnail(mod_id, id).is_some();
                writeln!(
                    out,
                    "    youtube {} (thumbnail {})",
                    id,
                    if cached { "cached" } else { "not cached" }
                )?;
            }
            None => writeln!(out, "    youtube {} (unrecognized link)", link)?,
        }
    }

    let logo_file = profile.logo().filename.as_str();
    let logo_cached = !logo_file.is_empty()
        && cache
            .load_mod_logo(mod_id, LogoSize::Original, Some(logo_file))
            .is_some();
    writeln!(out, "  logo:       {}", if logo_cached { "cached" } else { "not cached" })?;

    if let Some(at) = cache.cached_at(Identity::mod_profile(mod_id)) {
        writeln!(out, "  cached:     {}", age_display(at, Utc::now()))?;
    }
    Ok(())
}

fn stats(cache: &ModCache, mod_id: i64, out: &mut impl Write) -> Result<()> {
    let stats = cache
        .load_mod_statistics(mod_id)
        .ok_or_else(|| anyhow!("statistics for mod {} are not cached", mod_id))?;

    writeln!(out, "downloads:   {}", stats.downloads_total)?;
    writeln!(out, "subscribers: {}", stats.subscribers_total)?;
    writeln!(
        out,
        "popularity:  {} of {}",
        stats.popularity_rank_position, stats.popularity_rank_total_mods
    )?;
    writeln!(
        out,
        "ratings:     {} (+{} / -{}) {}",
        stats.ratings_total,
        stats.ratings_positive,
        stats.ratings_negative,
        stats.ratings_display_text
    )?;
    let expired = stats.is_expired(Utc::now().timestamp());
    writeln!(
        out,
        "expires:     {}{}",
        format_timestamp(stats.date_expires),
        if expired { " (expired)" } else { "" }
    )?;
    Ok(())
}

fn team(cache: &ModCache, mod_id: i64, out: &mut impl Write) -> Result<()> {
    let members = cache
        .load_mod_team(mod_id)
        .ok_or_else(|| anyhow!("team for mod {} is not cached", mod_id))?;

    for member in members {
        let level = member
            .level()
            .map(|l| l.to_string())
            .unwrap_or_else(|| format!("level {}", member.level));
        writeln!(
            out,
            "{:<24}  {:<14}  {}",
            member.user.username, level, member.position
        )?;
    }
    Ok(())
}

fn files(cache: &ModCache, mod_id: i64, modfile_id: i64, out: &mut impl Write) -> Result<()> {
    let modfile = cache
        .load_modfile(mod_id, modfile_id)
        .ok_or_else(|| anyhow!("modfile {} of mod {} is not cached", modfile_id, mod_id))?;

    writeln!(out, "{} ({} bytes)", modfile.filename, modfile.filesize)?;
    if let Some(version) = &modfile.version {
        writeln!(out, "  version:  {}", version)?;
    }
    writeln!(out, "  added:    {}", format_timestamp(modfile.date_added))?;
    writeln!(out, "  md5:      {}", modfile.filehash.md5)?;

    let archive = cache.modfile_archive_path(mod_id, modfile_id);
    if archive.is_file() {
        writeln!(out, "  archive:  {}", archive.display())?;
    } else {
        writeln!(out, "  archive:  not cached")?;
    }
    Ok(())
}

fn user(cache: &ModCache, user_id: i64, out: &mut impl Write) -> Result<()> {
    let profile = cache
        .load_user_profile(user_id)
        .ok_or_else(|| anyhow!("user {} is not cached", user_id))?;

    writeln!(out, "{} ({})", profile.username, profile.name_id)?;
    writeln!(out, "  id:      {}", profile.id)?;
    writeln!(out, "  online:  {}", format_timestamp(profile.date_online))?;

    let avatar_file = profile.avatar.filename.as_str();
    let avatar_cached = !avatar_file.is_empty()
        && cache
            .load_user_avatar(user_id, AvatarSize::Original, Some(avatar_file))
            .is_some();
    writeln!(out, "  avatar:  {}", if avatar_cached { "cached" } else { "not cached" })?;
    Ok(())
}

fn users(cache: &ModCache, out: &mut impl Write) -> Result<()> {
    for profile in cache.iter_user_profiles(0) {
        writeln!(out, "{:>8}  {}", profile.id, profile.username)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modcache_core::models::{ModObject, ModStatistics, UserProfile};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_to_string(cache: &ModCache, command: Command) -> String {
        let mut out = Vec::new();
        run(cache, &command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn profile(id: i64, name: &str) -> ModProfile {
        ModProfile::from(ModObject {
            id,
            name: name.to_string(),
            status: 1,
            visible: 1,
            ..Default::default()
        })
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&args(&["list"])).unwrap(), Command::List { offset: 0 });
        assert_eq!(
            Command::parse(&args(&["list", "5"])).unwrap(),
            Command::List { offset: 5 }
        );
        assert_eq!(
            Command::parse(&args(&["files", "1", "2"])).unwrap(),
            Command::Files { mod_id: 1, modfile_id: 2 }
        );
        assert_eq!(
            Command::parse(&args(&["evict-user", "9"])).unwrap(),
            Command::EvictUser { user_id: 9 }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse(&[]).is_err());
        assert!(Command::parse(&args(&["bogus"])).is_err());
        assert!(Command::parse(&args(&["show"])).is_err());
        assert!(Command::parse(&args(&["show", "abc"])).is_err());
        assert!(Command::parse(&args(&["count", "extra"])).is_err());
    }

    // ========================================================================
    // Running
    // ========================================================================

    #[test]
    fn test_list_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        cache
            .save_mod_profiles(&[profile(1, "Alpha"), profile(2, "Beta")])
            .unwrap();

        assert_eq!(run_to_string(&cache, Command::Count).trim(), "2");
        let listing = run_to_string(&cache, Command::List { offset: 0 });
        assert!(listing.contains("Alpha"));
        assert!(listing.contains("Beta"));
        let rest = run_to_string(&cache, Command::List { offset: 1 });
        assert!(!rest.contains("Alpha"));
    }

    #[test]
    fn test_show_missing_mod_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        let mut out = Vec::new();
        assert!(run(&cache, &Command::Show { mod_id: 3 }, &mut out).is_err());
    }

    #[test]
    fn test_show_prints_profile() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        cache.save_mod_profile(&profile(42, "Foo")).unwrap();
        let text = run_to_string(&cache, Command::Show { mod_id: 42 });
        assert!(text.starts_with("Foo"));
        assert!(text.contains("logo:       not cached"));
        assert!(text.contains("cached:     just now"));
    }

    #[test]
    fn test_show_reports_youtube_thumbnails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        let mut object = profile(8, "Video").into_raw();
        object.media.youtube = vec![
            "https://youtu.be/dQw4w9WgXcQ".to_string(),
            "https://example.com/clip".to_string(),
        ];
        cache.save_mod_profile(&ModProfile::from(object)).unwrap();
        cache.save_youtube_thumbnail(8, "dQw4w9WgXcQ", b"png").unwrap();

        let text = run_to_string(&cache, Command::Show { mod_id: 8 });
        assert!(text.contains("youtube dQw4w9WgXcQ (thumbnail cached)"));
        assert!(text.contains("unrecognized link"));
    }

    #[test]
    fn test_stats() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        cache
            .save_mod_statistics(&ModStatistics {
                mod_id: 4,
                downloads_total: 1234,
                ..Default::default()
            })
            .unwrap();
        let text = run_to_string(&cache, Command::Stats { mod_id: 4 });
        assert!(text.contains("downloads:   1234"));
        assert!(text.contains("never"));
    }

    #[test]
    fn test_evict_removes_mod() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        cache.save_mod_profile(&profile(7, "Gone")).unwrap();
        run_to_string(&cache, Command::Evict { mod_id: 7 });
        assert!(cache.load_mod_profile(7).is_none());
    }

    #[test]
    fn test_users_and_evict_user() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModCache::new(dir.path()).unwrap();
        cache
            .save_user_profile(&UserProfile {
                id: 5,
                username: "someone".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(run_to_string(&cache, Command::Users).contains("someone"));
        run_to_string(&cache, Command::EvictUser { user_id: 5 });
        assert!(run_to_string(&cache, Command::Users).is_empty());
    }
}
