//! Demo catalogue data.

use serde::Serialize;
use tracing::info;

use crate::models::{ArtPeriod, Artwork, ArtworkDraft, PeriodDraft};
use crate::repository::{DieselDbContext, DieselError};

struct SeedPeriod {
    name: &'static str,
    start_year: i32,
    end_year: i32,
    color: &'static str,
    description: &'static str,
}

struct SeedArtwork {
    title: &'static str,
    artist: &'static str,
    year: i32,
    description: &'static str,
    period: &'static str,
}

const PERIODS: &[SeedPeriod] = &[
    SeedPeriod {
        name: "Renaissance",
        start_year: 1400,
        end_year: 1600,
        color: "#ff6b6b",
        description: "Revival of European culture and the rise of humanism",
    },
    SeedPeriod {
        name: "Baroque",
        start_year: 1605,
        end_year: 1750,
        color: "#4ecdc4",
        description: "Opulent, dramatic and ornate",
    },
    SeedPeriod {
        name: "Impressionism",
        start_year: 1870,
        end_year: 1900,
        color: "#45b7d1",
        description: "Painting focused on the changing effects of light",
    },
];

const ARTWORKS: &[SeedArtwork] = &[
    SeedArtwork {
        title: "Mona Lisa",
        artist: "Leonardo da Vinci",
        year: 1503,
        description: "Masterpiece of Renaissance portraiture",
        period: "Renaissance",
    },
    SeedArtwork {
        title: "The Night Watch",
        artist: "Rembrandt",
        year: 1642,
        description: "Baroque group portrait",
        period: "Baroque",
    },
    SeedArtwork {
        title: "Impression, Sunrise",
        artist: "Claude Monet",
        year: 1872,
        description: "The painting that gave Impressionism its name",
        period: "Impressionism",
    },
];

/// Outcome of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    /// Demo periods present after the run (found or created).
    pub periods: usize,
    pub artworks_inserted: usize,
}

/// Insert the demo periods and artworks that are not already present.
///
/// Periods are matched by name and artworks by title, artist and year, so
/// running this twice inserts nothing the second time.
pub async fn seed_demo_data(ctx: &DieselDbContext) -> Result<SeedSummary, DieselError> {
    let periods = ctx.periods();
    let mut seeded: Vec<ArtPeriod> = Vec::with_capacity(PERIODS.len());

    for seed in PERIODS {
        let period = match periods.find_by_name(seed.name).await? {
            Some(existing) => existing,
            None => {
                let period = ArtPeriod::new(PeriodDraft {
                    name: seed.name.to_string(),
                    start_year: seed.start_year,
                    end_year: seed.end_year,
                    color: seed.color.to_string(),
                    description: seed.description.to_string(),
                    image_url: String::new(),
                });
                periods.create(&period).await?;
                period
            }
        };
        seeded.push(period);
    }

    let artworks = ctx.artworks();
    let mut inserted = 0;
    for seed in ARTWORKS {
        if artworks
            .find_exact(seed.title, seed.artist, seed.year)
            .await?
            .is_some()
        {
            continue;
        }

        let artwork = Artwork::new(ArtworkDraft {
            title: seed.title.to_string(),
            artist: seed.artist.to_string(),
            year: seed.year,
            image_url: String::new(),
            description: seed.description.to_string(),
            period_id: seeded
                .iter()
                .find(|p| p.name == seed.period)
                .map(|p| p.id.clone()),
        });
        artworks.create(&artwork).await?;
        inserted += 1;
    }

    info!(
        "Seeded {} periods, inserted {} artworks",
        seeded.len(),
        inserted
    );
    Ok(SeedSummary {
        periods: seeded.len(),
        artworks_inserted: inserted,
    })
}
