//! Gallery commands.

use mindfulart_core::{ArtworkKey, OutputFormatter, Source, Viewport};
use mindfulart_gallery::{Gallery, GalleryError, GalleryStore};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Characters of the gallery id shown in listings. Any unique prefix is accepted back.
const SHORT_ID_LEN: usize = 8;

/// List galleries.
pub fn list(config: &ClientConfig) -> ClientResult<()> {
    let store = config.open_gallery_store()?;
    println!("{}", render_list(store.galleries()));
    Ok(())
}

/// Show one gallery with full view image URLs sized for `viewport`.
pub fn show(config: &ClientConfig, id: &str, viewport: Viewport) -> ClientResult<()> {
    let store = config.open_gallery_store()?;
    let gallery = store.resolve(id)?;
    println!(
        "{}",
        render_gallery(gallery, &OutputFormatter::default(), viewport)
    );
    Ok(())
}

/// Create a gallery.
pub fn create(config: &ClientConfig, name: &str, description: &str) -> ClientResult<()> {
    let mut store = config.open_gallery_store()?;
    let gallery = store.create_gallery(name, description)?;
    println!("Created gallery {} ({})", gallery.name, gallery.id);
    Ok(())
}

/// Rename a gallery, optionally replacing its description.
pub fn rename(
    config: &ClientConfig,
    id: &str,
    name: &str,
    description: Option<&str>,
) -> ClientResult<()> {
    let mut store = config.open_gallery_store()?;
    let gallery_id = store.resolve(id)?.id.clone();
    store.rename_gallery(&gallery_id, name, description)?;
    println!("Renamed gallery {} to {}", short_id(&gallery_id), name.trim());
    Ok(())
}

/// Delete a gallery.
pub fn delete(config: &ClientConfig, id: &str) -> ClientResult<()> {
    let mut store = config.open_gallery_store()?;
    println!("{}", delete_in(&mut store, id)?);
    Ok(())
}

/// Remove one artwork from a gallery.
pub fn remove(
    config: &ClientConfig,
    id: &str,
    source: Source,
    artwork_id: &str,
) -> ClientResult<()> {
    let mut store = config.open_gallery_store()?;
    println!("{}", remove_in(&mut store, id, source, artwork_id)?);
    Ok(())
}

fn delete_in(store: &mut GalleryStore, id: &str) -> ClientResult<String> {
    let gallery = store.resolve(id)?;
    let (gallery_id, name) = (gallery.id.clone(), gallery.name.clone());
    if !store.delete_gallery(&gallery_id)? {
        return Err(GalleryError::not_found(gallery_id).into());
    }
    Ok(format!("Deleted gallery {}", name))
}

fn remove_in(
    store: &mut GalleryStore,
    id: &str,
    source: Source,
    artwork_id: &str,
) -> ClientResult<String> {
    let gallery = store.resolve(id)?;
    let (gallery_id, name) = (gallery.id.clone(), gallery.name.clone());
    let key = ArtworkKey::new(source, artwork_id.trim());
    if store.remove_artwork(&gallery_id, &key)? {
        Ok(format!("Removed {} from {}", key, name))
    } else {
        Ok(format!("{} is not in {}", key, name))
    }
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// One block per gallery: short id, name, size and creation date.
pub fn render_list(galleries: &[Gallery]) -> String {
    if galleries.is_empty() {
        return "No galleries yet. Create one with: mindfulart gallery create <NAME>".to_string();
    }

    let mut lines = Vec::new();
    for gallery in galleries {
        lines.push(format!(
            "{}  {} ({} artwork{}, created {})",
            short_id(&gallery.id),
            gallery.name,
            gallery.len(),
            if gallery.len() == 1 { "" } else { "s" },
            gallery.created_at.format("%Y-%m-%d")
        ));
        if !gallery.description.is_empty() {
            lines.push(format!(
                "{:width$}  {}",
                "",
                gallery.description,
                width = SHORT_ID_LEN
            ));
        }
    }
    lines.join("\n")
}

/// Gallery header followed by a numbered full view of each artwork.
pub fn render_gallery(
    gallery: &Gallery,
    formatter: &OutputFormatter,
    viewport: Viewport,
) -> String {
    let mut lines = vec![gallery.name.clone()];
    if !gallery.description.is_empty() {
        lines.push(gallery.description.clone());
    }
    lines.push(format!("id: {}", gallery.id));

    if gallery.is_empty() {
        lines.push(String::new());
        lines.push(
            "No artworks yet. Save some with: mindfulart search <QUERY> --save-to <ID> --pick <N>"
                .to_string(),
        );
    }
    for (index, artwork) in gallery.artworks.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{:>2}. {}",
            index + 1,
            formatter.format_full_view(artwork, viewport)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IIIF: &str = "https://ids.lib.harvard.edu/ids/iiif/42";

    fn gallery(artworks: serde_json::Value) -> Gallery {
        serde_json::from_value(json!({
            "id": "0f8e2b1c-5d7a-4c3e-9b6f-2a1d0c9e8b7a",
            "name": "Still Lifes",
            "description": "Flowers and fruit",
            "createdAt": "2024-03-01T09:30:00Z",
            "artworks": artworks,
        }))
        .unwrap()
    }

    fn saved_artworks() -> serde_json::Value {
        json!([
            {
                "id": "42",
                "title": "Peonies",
                "artist": "Édouard Manet",
                "date": "1864",
                "imageUrl": format!("{}/full/full/0/default.jpg", IIIF),
                "thumbnailUrl": format!("{}/full/500,/0/default.jpg", IIIF),
                "objectUrl": "https://harvardartmuseums.org/collections/object/42",
                "institution": "Harvard Art Museums",
                "source": "harvard"
            },
            {
                "id": "SK-A-2",
                "title": "Still Life with Cheese",
                "artist": "Floris van Dijck",
                "imageUrl": null,
                "objectUrl": null,
                "institution": "Rijksmuseum",
                "source": "rijksmuseum"
            }
        ])
    }

    #[test]
    fn list_layout() {
        let galleries = vec![gallery(saved_artworks()), {
            let mut empty = gallery(json!([]));
            empty.id = "77aa0000-0000-0000-0000-000000000000".to_string();
            empty.name = "Empty".to_string();
            empty.description = String::new();
            empty
        }];

        insta::assert_snapshot!(render_list(&galleries), @r"
        0f8e2b1c  Still Lifes (2 artworks, created 2024-03-01)
                  Flowers and fruit
        77aa0000  Empty (0 artworks, created 2024-03-01)
        ");
    }

    #[test]
    fn list_without_galleries() {
        assert!(render_list(&[]).starts_with("No galleries yet."));
    }

    #[test]
    fn show_sizes_images_for_viewport() {
        let output = render_gallery(
            &gallery(saved_artworks()),
            &OutputFormatter::default(),
            Viewport::new(800, 2.0),
        );

        insta::assert_snapshot!(output, @r"
        Still Lifes
        Flowers and fruit
        id: 0f8e2b1c-5d7a-4c3e-9b6f-2a1d0c9e8b7a

         1. Peonies - Édouard Manet, 1864
          image:  https://ids.lib.harvard.edu/ids/iiif/42/full/1600,/0/default.jpg
          record: https://harvardartmuseums.org/collections/object/42
          key:    harvard:42

         2. Still Life with Cheese - Floris van Dijck
          image:  (no image)
          key:    rijksmuseum:SK-A-2
        ");
    }

    #[test]
    fn delete_and_remove_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = GalleryStore::open(dir.path().join("galleries.json")).unwrap();
        let created = store.create_gallery("Prints", "").unwrap();
        let artwork = mindfulart_core::Artwork::new(Source::Harvard, "9").with_title("Wave");
        store.add_artwork(&created.id, artwork).unwrap();

        let prefix = short_id(&created.id).to_string();
        let message = remove_in(&mut store, &prefix, Source::Harvard, "9").unwrap();
        assert_eq!(message, "Removed harvard:9 from Prints");
        let message = remove_in(&mut store, &prefix, Source::Harvard, "9").unwrap();
        assert_eq!(message, "harvard:9 is not in Prints");

        assert_eq!(delete_in(&mut store, &prefix).unwrap(), "Deleted gallery Prints");
        assert!(store.get(&created.id).is_none());
        assert!(delete_in(&mut store, &prefix).is_err());
    }
}
