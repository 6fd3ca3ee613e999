use std::path::Path;

use lofiroom_core::selection::catalog;
use lofiroom_core::{Appearance, Background, Choice, Genre};
use serde::Serialize;

use super::load_config;

#[derive(Serialize)]
struct GenreRow {
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct BackgroundRow {
    key: &'static str,
    label: &'static str,
    image: String,
    selected: bool,
}

pub fn tracks(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let tracks = config.track_list()?;
    println!("{}", serde_json::to_string_pretty(&tracks)?);
    Ok(())
}

pub fn genres(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let rows: Vec<GenreRow> = catalog(config.player.genre)
        .into_iter()
        .filter_map(|entry| {
            let genre = Genre::from_key(entry.key)?;
            Some(GenreRow {
                key: entry.key,
                name: entry.label,
                icon: genre.icon(),
                color: genre.color(),
                selected: entry.selected,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

pub fn backgrounds(config_path: Option<&Path>, light: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let appearance = if light { Appearance::Light } else { Appearance::Dark };
    let rows: Vec<BackgroundRow> = Background::all()
        .iter()
        .map(|bg| BackgroundRow {
            key: bg.key(),
            label: bg.label(),
            image: bg.image(appearance).to_string(),
            selected: *bg == config.ui.background,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
