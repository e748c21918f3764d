use touchline::{
    init_logging, BoardConfig, BoardEngine, Card, CardGeometry, FileLayoutStore, FormationPlayer,
    GridMetrics,
};

/// Minimal demo catalog for the default screen. Real screen catalogs are
/// assembled by the presentation layer.
fn demo_cards() -> Vec<Card> {
    vec![
        Card::new("squad-fitness", "Squad Fitness", CardGeometry::new(0, 0, 4, 3)),
        Card::new("next-fixture", "Next Fixture", CardGeometry::new(4, 0, 4, 3)),
        Card::new("league-table", "League Table", CardGeometry::new(8, 0, 4, 6)),
        Card::new("tactics-pitch", "Formation", CardGeometry::new(0, 3, 8, 8)).with_players(vec![
            FormationPlayer::new("gk", 0.5, 0.92),
            FormationPlayer::new("dc-left", 0.35, 0.75),
            FormationPlayer::new("dc-right", 0.65, 0.75),
            FormationPlayer::new("st", 0.5, 0.15),
        ]),
    ]
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    tracing::info!(
        "Touchline {} (built {})",
        touchline::VERSION,
        touchline::BUILD_DATE
    );

    let config = match std::env::args().nth(1) {
        Some(path) => BoardConfig::load_from_file(std::path::Path::new(&path))?,
        None => BoardConfig::default(),
    };

    let store = match &config.layout_path {
        Some(path) => FileLayoutStore::open(path),
        None => FileLayoutStore::open_default()?,
    };
    tracing::info!("Layout store at {}", store.path().display());

    let metrics = GridMetrics::new(
        config.grid.columns,
        config.grid.rows,
        config.grid.cell_size,
        config.grid.cell_gap,
    );
    let mut board = BoardEngine::new(metrics, Box::new(store));
    board.set_active_screen("club-overview", demo_cards());

    for card in board.cards() {
        tracing::info!(
            "{} '{}' at column {} row {} ({}x{} cells)",
            card.id,
            card.title,
            card.geometry.column,
            card.geometry.row,
            card.geometry.column_span,
            card.geometry.row_span
        );
    }

    Ok(())
}
