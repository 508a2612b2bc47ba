use anyhow::Result;
use colored::Colorize;

use storyline_infrastructure::{ConfigService, StoryPaths};

pub fn init(paths: &StoryPaths) -> Result<()> {
    let service = ConfigService::from_paths(paths)?;
    if service.ensure_config_file()? {
        println!("{} {}", "Created".green(), service.path().display());
    } else {
        println!("{} already exists", service.path().display());
    }
    Ok(())
}

pub fn show(paths: &StoryPaths) -> Result<()> {
    let service = ConfigService::from_paths(paths)?;
    let config = service.load()?;

    println!("{}", format!("# {}", service.path().display()).dimmed());
    println!("base_url  = {}", config.base_url);
    println!("page_size = {}", config.page_size);
    println!("location  = {:?}", config.location);
    Ok(())
}
