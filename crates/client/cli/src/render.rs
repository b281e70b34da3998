//! Plain-text presentation of world snapshots.

use runtime::{EntityView, WorldView};

/// Character for a tile, by tile type name.
fn tile_char(name: &str) -> char {
    match name {
        "Floor" => '.',
        "Water" => '~',
        "Wall" => '#',
        _ => '?',
    }
}

/// Entity glyphs are font indices; printable ASCII ones are shown as-is.
fn entity_char(entity: &EntityView, is_player: bool) -> char {
    if is_player {
        return '@';
    }
    char::from_u32(entity.glyph)
        .filter(|c| c.is_ascii_graphic())
        .unwrap_or('&')
}

/// Draws the map with the topmost entity on each cell.
pub fn map(view: &WorldView) -> String {
    let mut out = String::with_capacity(((view.width + 1) * view.height) as usize);
    for y in 0..view.height as i32 {
        for x in 0..view.width as i32 {
            let symbol = match view.entities_at(x, y).next() {
                Some(entity) => entity_char(entity, Some(entity.id) == view.player),
                None => view.tile(x, y).map_or(' ', |tile| tile_char(&tile.name)),
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

/// One status line for the player.
pub fn status(view: &WorldView) -> String {
    let Some(player) = view.player_view() else {
        return format!("turn {} | you are dead", view.turns);
    };
    let (hp, max_hp) = player.hitpoints.unwrap_or_default();
    let (stamina, max_stamina) = player.stamina.unwrap_or_default();
    format!(
        "turn {} | hp {}/{} | stamina {}/{} | souls {} | at {}",
        view.turns,
        hp,
        max_hp,
        stamina,
        max_stamina,
        player.souls.unwrap_or_default(),
        player.position
    )
}

/// Describes the entities under the cursor, or the tile if there are none.
pub fn look(view: &WorldView) -> String {
    let Some(cursor) = view.cursor else {
        return "No cursor set".to_string();
    };
    let entities = view.at_cursor();
    if entities.is_empty() {
        return match view.tile(cursor.x, cursor.y) {
            Some(tile) => format!("{} at {}", tile.name, cursor),
            None => format!("Nothing at {}", cursor),
        };
    }
    entities
        .iter()
        .map(|entity| match &entity.description {
            Some(description) => format!("{}: {}", entity.name, description),
            None => entity.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
