//! Run settings merged from the command line, the config file and defaults.
//!
//! Command-line values win over file values, which win over built-in defaults.

use std::path::PathBuf;

use group_photos_core::catalog::DEFAULT_PAGE_SIZE;
use group_photos_core::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use group_photos_core::gallery::{DEFAULT_API_BASE, DEFAULT_WEB_BASE};
use group_photos_core::{GroupSite, HttpClientOptions};

use crate::cli::Args;
use crate::config::FileConfig;

/// Everything the runtime needs besides the requested actions.
#[derive(Debug, Clone)]
pub(crate) struct RunContext {
    pub(crate) site: GroupSite,
    pub(crate) cookies: Option<PathBuf>,
    pub(crate) output_dir: PathBuf,
    pub(crate) page_size: u64,
    pub(crate) http: HttpClientOptions,
}

impl RunContext {
    pub(crate) fn resolve(args: &Args, file: &FileConfig) -> Self {
        let api_base = args
            .api_base
            .clone()
            .or_else(|| file.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let web_base = args
            .web_base
            .clone()
            .or_else(|| file.web_base.clone())
            .unwrap_or_else(|| DEFAULT_WEB_BASE.to_string());

        Self {
            site: GroupSite::with_bases(args.group.clone(), api_base, web_base),
            cookies: args.cookies.clone().or_else(|| file.cookies.clone()),
            output_dir: args
                .output_dir
                .clone()
                .or_else(|| file.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            page_size: args.page_size.or(file.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            http: HttpClientOptions {
                browser: args
                    .browser
                    .map(Into::into)
                    .or(file.browser)
                    .unwrap_or_default(),
                connect_timeout_secs: file.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS),
                read_timeout_secs: file.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS),
            },
        }
    }
}

/// Log level used unless `RUST_LOG` is set.
///
/// Priority: quiet flag > verbose flag > config verbosity > `info`.
pub(crate) fn default_log_level(args: &Args, file: &FileConfig) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => file.verbosity.map_or("info", |setting| setting.log_level()),
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerbositySetting;
    use clap::Parser;
    use group_photos_core::Browser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["group-photos-dl", "vintage-cars"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_config() {
        let ctx = RunContext::resolve(&args(&[]), &FileConfig::default());
        assert_eq!(ctx.site, GroupSite::new("vintage-cars"));
        assert_eq!(ctx.output_dir, PathBuf::from("."));
        assert_eq!(ctx.page_size, DEFAULT_PAGE_SIZE);
        assert!(ctx.cookies.is_none());
        assert_eq!(ctx.http.browser, Browser::Chrome);
        assert_eq!(ctx.http.connect_timeout_secs, CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn test_file_values_fill_gaps() {
        let file = FileConfig {
            cookies: Some(PathBuf::from("/c.txt")),
            output_dir: Some(PathBuf::from("/photos")),
            browser: Some(Browser::Firefox),
            page_size: Some(25),
            read_timeout_secs: Some(60),
            ..FileConfig::default()
        };
        let ctx = RunContext::resolve(&args(&[]), &file);
        assert_eq!(ctx.cookies, Some(PathBuf::from("/c.txt")));
        assert_eq!(ctx.output_dir, PathBuf::from("/photos"));
        assert_eq!(ctx.http.browser, Browser::Firefox);
        assert_eq!(ctx.page_size, 25);
        assert_eq!(ctx.http.read_timeout_secs, 60);
    }

    #[test]
    fn test_cli_values_override_file() {
        let file = FileConfig {
            output_dir: Some(PathBuf::from("/photos")),
            browser: Some(Browser::Firefox),
            page_size: Some(25),
            api_base: Some("http://file/api".to_string()),
            ..FileConfig::default()
        };
        let ctx = RunContext::resolve(
            &args(&[
                "-o",
                "/elsewhere",
                "--browser",
                "chrome",
                "--page-size",
                "10",
                "--api-base",
                "http://cli/api",
                "--web-base",
                "http://cli/web",
            ]),
            &file,
        );
        assert_eq!(ctx.output_dir, PathBuf::from("/elsewhere"));
        assert_eq!(ctx.http.browser, Browser::Chrome);
        assert_eq!(ctx.page_size, 10);
        assert_eq!(
            ctx.site,
            GroupSite::with_bases("vintage-cars", "http://cli/api", "http://cli/web")
        );
    }

    #[test]
    fn test_default_log_level_priority() {
        let quiet_file = FileConfig {
            verbosity: Some(VerbositySetting::Quiet),
            ..FileConfig::default()
        };
        assert_eq!(default_log_level(&args(&[]), &FileConfig::default()), "info");
        assert_eq!(default_log_level(&args(&[]), &quiet_file), "error");
        assert_eq!(default_log_level(&args(&["-v"]), &quiet_file), "debug");
        assert_eq!(default_log_level(&args(&["-vv"]), &quiet_file), "trace");
        assert_eq!(default_log_level(&args(&["-q"]), &FileConfig::default()), "error");
    }
}
