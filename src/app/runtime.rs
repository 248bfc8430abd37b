//! One run of the tool: probe access, fetch catalogs, report, download.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use group_photos_core::catalog::{self, Lookup};
use group_photos_core::download::DownloadReport;
use group_photos_core::download::filename::album_dir_name;
use group_photos_core::{
    Album, AuditLog, DownloadOutcome, DownloadScope, Downloader, GalleryClient, HttpClient, Photo,
    Transport, load_cookie_file, write_albums_csv, write_photos_csv,
};

use crate::app::context::RunContext;
use crate::app::exit::ProcessExit;
use crate::cli::Args;
use crate::output;

/// How many "did you mean" names to offer.
const SUGGESTION_LIMIT: usize = 3;

pub(crate) async fn run(args: &Args, ctx: &RunContext) -> Result<ProcessExit> {
    let transport = build_transport(ctx)?;
    let gallery = GalleryClient::new(Arc::clone(&transport), ctx.site.clone());

    println!("\nTesting access to group '{}'...", ctx.site.group());
    let stats = match catalog::group_stats(&gallery).await {
        Ok(stats) => stats,
        Err(error) => {
            output::print_lines(&output::access_failure_lines(&error));
            return Ok(ProcessExit::for_access_error(&error));
        }
    };
    output::print_lines(&output::group_stats_lines(stats));

    let mut albums = Vec::new();
    let mut selected_album = None;
    if args.wants_albums() {
        println!("\nFetching album list...");
        albums = match catalog::fetch_albums(&gallery, ctx.page_size).await {
            Ok(albums) if !albums.is_empty() => albums,
            Ok(_) => {
                println!("\nThe group has no albums.");
                return Ok(ProcessExit::EmptyAlbumList);
            }
            Err(error) => {
                warn!(%error, "album list fetch abandoned");
                println!("\nFetching the album list failed.");
                return Ok(ProcessExit::EmptyAlbumList);
            }
        };
        println!("\nRetrieved details of {} albums.", albums.len());
        report_albums(args, &albums)?;

        match select_album(args, &albums) {
            Ok(album) => selected_album = album.cloned(),
            Err(exit) => return Ok(exit),
        }
    }

    if !args.wants_photos() {
        return Ok(ProcessExit::Success);
    }

    let photos = match &selected_album {
        Some(album) => {
            println!("\nFetching list of photos in the album...");
            catalog::fetch_album_photos(&gallery, album.id, ctx.page_size).await
        }
        None => {
            println!("\nFetching list of all photos in the group...");
            println!("(This could take a while.)");
            catalog::fetch_group_photos(&gallery, ctx.page_size).await
        }
    };
    let photos = match photos {
        Ok(photos) if !photos.is_empty() => photos,
        Ok(_) => {
            println!("The photo list is empty.");
            return Ok(ProcessExit::EmptyPhotoList);
        }
        Err(error) => {
            warn!(%error, "photo list fetch abandoned");
            println!("Fetching the photo list failed.");
            return Ok(ProcessExit::EmptyPhotoList);
        }
    };
    println!("\nRetrieved details of {} photos.", photos.len());
    report_photos(args, &photos)?;

    if !args.wants_single_download() && !args.download_all {
        return Ok(ProcessExit::Success);
    }

    tokio::fs::create_dir_all(&ctx.output_dir)
        .await
        .with_context(|| format!("Failed to create output directory '{}'", ctx.output_dir.display()))?;
    let downloader = Downloader::new(transport, ctx.site.clone(), ctx.output_dir.clone());
    let scope = match &selected_album {
        Some(album) => DownloadScope::Album(album),
        None => DownloadScope::Group(&albums),
    };

    if args.wants_single_download() {
        let photo = match select_photo(args, &photos) {
            Ok(photo) => photo,
            Err(exit) => return Ok(exit),
        };
        let report = downloader
            .download_one(photo, scope, args.filename.as_deref())
            .await?;
        return Ok(report_single_download(&report));
    }

    let mut audit = match &args.log_csv {
        Some(path) => Some(
            AuditLog::open(path)
                .with_context(|| format!("Failed to open download log '{}'", path.display()))?,
        ),
        None => None,
    };
    if let DownloadScope::Album(album) = scope {
        println!(
            "\nDownloading into directory {}",
            ctx.output_dir
                .join(album_dir_name(album.id, Some(&album.name)))
                .display()
        );
    }
    let summary = downloader
        .download_all(&photos, scope, audit.as_mut())
        .await?;
    println!(
        "\nFinished: {} downloaded, {} already present, {} failed.",
        summary.succeeded, summary.skipped, summary.failed
    );
    if let Some(log) = &audit {
        println!("Logged {} downloads to {}", log.rows_written(), log.path().display());
    }
    Ok(ProcessExit::Success)
}

fn build_transport(ctx: &RunContext) -> Result<Arc<dyn Transport>> {
    let client = match &ctx.cookies {
        Some(path) => {
            let jar = load_cookie_file(path)?;
            HttpClient::with_cookie_jar(jar, &ctx.http)?
        }
        None => {
            warn!("no cookie file given; members-only groups will refuse access");
            HttpClient::new(&ctx.http)?
        }
    };
    info!(browser = %ctx.http.browser, "HTTP session ready");
    Ok(Arc::new(client))
}

fn report_albums(args: &Args, albums: &[Album]) -> Result<()> {
    if args.list_albums {
        output::print_lines(&output::album_details_lines(albums));
    }
    if let Some(path) = &args.list_albums_csv {
        write_albums_csv(path, albums)?;
        println!("\nSaved file {}", path.display());
    }
    if args.list_album_ids {
        output::print_lines(&output::album_id_lines(albums));
    }
    Ok(())
}

fn report_photos(args: &Args, photos: &[Photo]) -> Result<()> {
    if args.list_photos {
        output::print_lines(&output::photo_details_lines(photos, false));
    }
    if let Some(path) = &args.list_photos_csv {
        write_photos_csv(path, photos)?;
        println!("\nSaved file {}", path.display());
    }
    if args.list_photo_ids {
        output::print_lines(&output::photo_id_lines(photos));
    }
    Ok(())
}

/// Resolves `--album` / `--album-id`. `Ok(None)` when neither was given.
fn select_album<'a>(args: &Args, albums: &'a [Album]) -> Result<Option<&'a Album>, ProcessExit> {
    let lookup = if let Some(name) = &args.album {
        let lookup = catalog::find_album_by_name(albums, name);
        if matches!(lookup, Lookup::NotFound) {
            println!("\nUnable to find the album called '{name}'.");
            println!("Please double-check the name.");
            let candidates = catalog::closest_album_names(albums, name, SUGGESTION_LIMIT);
            if let Some(line) = output::suggestion_line(&candidates) {
                println!("{line}");
            }
        }
        lookup
    } else if let Some(id) = args.album_id {
        let lookup = catalog::find_album_by_id(albums, id);
        if matches!(lookup, Lookup::NotFound) {
            println!("\nUnable to find the album with ID number {id}.");
            println!("Please double-check the number.");
        }
        lookup
    } else {
        return Ok(None);
    };

    match lookup {
        Lookup::Found(album) => {
            println!("\nSelected the following album:");
            output::print_lines(&output::album_details_lines(std::slice::from_ref(album)));
            Ok(Some(album))
        }
        Lookup::NotFound => Err(ProcessExit::NotFound),
        Lookup::Ambiguous(candidates) => {
            println!("\nSearch returned {} albums!", candidates.len());
            println!("Please use --album-id with the ID number from the following list:");
            let owned: Vec<Album> = candidates.into_iter().cloned().collect();
            output::print_lines(&output::album_id_lines(&owned));
            Err(ProcessExit::Ambiguous)
        }
    }
}

/// Resolves `--download-photo` / `--download-photo-id`.
fn select_photo<'a>(args: &Args, photos: &'a [Photo]) -> Result<&'a Photo, ProcessExit> {
    let lookup = if let Some(name) = &args.download_photo {
        let lookup = catalog::find_photo_by_name(photos, name);
        if matches!(lookup, Lookup::NotFound) {
            println!("\nUnable to find the photo called '{name}'.");
            println!("Please double-check the name.");
            let candidates = catalog::closest_photo_names(photos, name, SUGGESTION_LIMIT);
            if let Some(line) = output::suggestion_line(&candidates) {
                println!("{line}");
            }
        }
        lookup
    } else if let Some(id) = args.download_photo_id {
        let lookup = catalog::find_photo_by_id(photos, id);
        if matches!(lookup, Lookup::NotFound) {
            println!("\nUnable to find the photo with ID number {id}.");
            println!("Please double-check the number.");
        }
        lookup
    } else {
        return Err(ProcessExit::NotFound);
    };

    match lookup {
        Lookup::Found(photo) => {
            println!("\nSelected the following photo:");
            output::print_lines(&output::photo_details_lines(std::slice::from_ref(photo), true));
            Ok(photo)
        }
        Lookup::NotFound => Err(ProcessExit::NotFound),
        Lookup::Ambiguous(candidates) => {
            println!("\nSearch returned {} photos with that name!", candidates.len());
            println!(
                "Please use --download-photo-id with the ID number from the following list:"
            );
            let owned: Vec<Photo> = candidates.into_iter().cloned().collect();
            output::print_lines(&output::photo_details_lines(&owned, true));
            Err(ProcessExit::Ambiguous)
        }
    }
}

fn report_single_download(report: &DownloadReport) -> ProcessExit {
    let shown = report
        .path
        .file_name()
        .unwrap_or(report.path.as_os_str())
        .to_string_lossy();
    match report.outcome {
        DownloadOutcome::Success => {
            println!("Downloaded successfully as {}.", report.path.display());
            ProcessExit::Success
        }
        DownloadOutcome::Skipped => {
            println!("File '{shown}' already exists - skipping download.");
            ProcessExit::Success
        }
        DownloadOutcome::TransferError { status } => {
            match status {
                Some(status) => println!("Server returned error {status}"),
                None => println!("The download did not get a response from the server."),
            }
            ProcessExit::Failure
        }
    }
}
