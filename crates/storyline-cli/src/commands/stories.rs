use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use storyline_application::{AppContext, LoadOutcome};
use storyline_core::story::{NewStory, StorySummary};

use super::photo::read_photo;
use super::{drive, report};

fn print_story(story: &StorySummary) {
    println!(
        "{} {} {}",
        story.id.dimmed(),
        story.name.bold(),
        story.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    println!("    {}", story.description);
    if let (Some(lat), Some(lon)) = (story.lat, story.lon) {
        println!("    {}", format!("@ {:.4}, {:.4}", lat, lon).cyan());
    }
}

pub async fn list(context: &AppContext) -> Result<()> {
    let stories = context.stories.fetch_all_stories().await.map_err(report)?;
    if stories.is_empty() {
        println!("{}", "No stories yet".yellow());
    }
    for story in &stories {
        print_story(story);
    }
    Ok(())
}

pub async fn feed(context: &AppContext, pages: u32) -> Result<()> {
    let pager = context.stories.paged_stories();
    let mut printed = 0;

    for page in 0..pages.max(1) {
        let result = if page == 0 {
            pager.load_initial().await
        } else {
            pager.load_next().await
        };
        let outcome = result.map_err(report)?;

        let items = pager.items();
        for story in &items[printed..] {
            print_story(story);
        }
        printed = items.len();

        if outcome == LoadOutcome::EndOfData {
            println!("{}", "-- end of feed --".dimmed());
            break;
        }
    }
    Ok(())
}

pub async fn detail(context: &AppContext, id: &str) -> Result<()> {
    let story = context.stories.story_detail(id).await.map_err(|err| {
        if err.is_not_found() {
            anyhow::anyhow!("No story with id {}", id)
        } else {
            report(err)
        }
    })?;

    print_story(&story.summary);
    println!("    {}", story.summary.photo_url.underline());
    Ok(())
}

pub async fn upload(
    context: &AppContext,
    photo: &Path,
    description: String,
    location: Option<(f64, f64)>,
    guest: bool,
) -> Result<()> {
    let mut story = NewStory::new(read_photo(photo)?, description);
    if let Some((lat, lon)) = location {
        story = story.with_location(lat, lon);
    }

    let message = if guest {
        drive("Uploading", context.stories.upload_guest_story_stream(story)).await?
    } else {
        eprintln!("{}", "Uploading...".dimmed());
        context.stories.upload_story(story).await.map_err(report)?
    };

    println!("{}", message.green());
    Ok(())
}
