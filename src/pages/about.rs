use crate::components::{attr, card, esc, section_title};
use crate::config::SiteConfig;

const MISSION: [&str; 4] = [
    "The Incurable Humanist is a space for grief, migration, and art.",
    "Grief is more than mourning the death of a loved one. It is leaving home, it is heartbreak, it is losing who we once were, it is navigating trauma.",
    "Migration, too, is a form of grief. Each journey carries a weight of love, loss, and transformation.",
    "Art is our lifesaver. Art in any of its forms, whether it is painting, music, writing, cooking, theater, film, photography, etc., is a tool through which we process, endure, and transform our grief. Through art, we find resilience.",
];

const ORIGIN: [&str; 2] = [
    "The Incurable Humanist was born from the founder, Denise Rodriguez Dao's, own experiences. The profound grief of losing her father, the dislocations of migration from Caracas to Mexico City and now New York, her work in the art world, and her legal experience helping artists and entrepreneurs find new homes in the United States.",
    "The Incurable Humanist is both personal and collective. It begins with Denise's storytelling; her experiences are the lens through which this space takes shape. Yet it is also collective, because it invites you to share your story.",
];

const FOUNDER: [&str; 4] = [
    "Denise Rodriguez Dao writes The Incurable Humanist, a weekly newsletter exploring grief, migration, and art.",
    "She currently works as a foreign attorney at a boutique immigration law firm in Manhattan, where she secures visas for artists, gallerists, entrepreneurs, and cultural professionals.",
    "She also has a background in the arts, having served as content director, head of logistics, and artist liaison at Galería RGR in Mexico City. There, she managed a roster that included both iconic figures of Latin American modernism and leading contemporary artists.",
    "Denise holds a master's degree in Modern and Contemporary Art and the Market from Christie's Education in New York and a J.D. from Andrés Bello Catholic University in Caracas, Venezuela.",
];

fn paragraphs(items: &[&str]) -> String {
    items.iter().map(|p| format!("<p>{}</p>", esc(p))).collect()
}

pub fn render(site: &SiteConfig) -> String {
    let mission = card(
        "about-card",
        &format!(
            r#"<h2>{}</h2><div class="prose">{}<div class="accent-rule"></div>{}</div>"#,
            esc(&site.hero.title),
            paragraphs(&MISSION),
            paragraphs(&ORIGIN)
        ),
    );
    let founder = card(
        "founder-card",
        &format!(
            r#"<h2>The Founder</h2><div class="founder-portrait"><img src="/static/founder.jpg" alt="{}"></div><div class="prose">{}</div>"#,
            attr(&format!("{}, founder of {}", site.author, site.hero.title)),
            paragraphs(&FOUNDER)
        ),
    );
    format!(
        r#"{}<section class="about">{mission}{founder}</section>"#,
        section_title("About")
    )
}
