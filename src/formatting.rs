use serenity::{builder::CreateEmbed, utils::Colour};

use crate::models::MovieCard;

pub fn format_movie_embed<'a>(card: &MovieCard, embed: &'a mut CreateEmbed) -> &'a mut CreateEmbed {
    embed.title(&card.title);
    // Discord rejects empty descriptions
    if !card.description.is_empty() {
        embed.description(&card.description);
    }
    embed.colour(Colour::BLUE);
    embed.field("More Info", format!("[TMDB]({})", card.link), true);
    embed.field("Release Date", &card.release_date, true);
    embed.field("Genre", &card.genres, true);
    embed.field("Popularity", &card.popularity, true);
    if let Some(image_url) = &card.image_url {
        embed.image(image_url);
    }
    if let Some(thumbnail_url) = &card.thumbnail_url {
        embed.thumbnail(thumbnail_url);
    }
    embed.footer(|footer| {
        footer.text(&card.footer_text);
        footer.icon_url(&card.footer_icon_url);
        footer
    });
    embed
}
