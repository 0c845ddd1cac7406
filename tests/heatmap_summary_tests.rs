use makeup_calendar::{
    DayCategory, HeatmapConfig, SimulationParams, build_sequence, category_counts,
    render_year_svg, render_year_text, simulate, summary_dataframe,
};

#[test]
fn svg_has_one_cell_per_day() {
    let (seq, _) = build_sequence(0);
    let config = HeatmapConfig::default();
    let svg = render_year_svg(&seq, 2024, &config.original_title, &config);

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<rect").count(), 366);
    assert!(svg.contains("Calendário Cefet/RJ original com a Greve 2024"));
    assert!(svg.contains(r#"data-date="2024-05-02" data-value="6""#));
    assert!(svg.contains(r#"fill="red""#));
    assert!(svg.contains(">Fev<"));
    assert!(svg.contains(">Seg<"));

    let svg_2025 = render_year_svg(&seq, 2025, &config.rescheduled_title, &config);
    assert_eq!(svg_2025.matches("<rect").count(), 365);
    assert!(!svg_2025.contains(r#"fill="red""#));
}

#[test]
fn palette_follows_category_order() {
    let config = HeatmapConfig::default();
    assert_eq!(config.color(DayCategory::Sunday), "blue");
    assert_eq!(config.color(DayCategory::Workday), "#DDD");
    assert_eq!(config.color(DayCategory::Vacation), "#618CCF");
    assert_eq!(config.color(DayCategory::PreSemesterBreak), "yellow");
    assert_eq!(config.color(DayCategory::SemesterStart), "green");
    assert_eq!(config.color(DayCategory::SemesterEnd), "#F1C196");
    assert_eq!(config.color(DayCategory::Strike), "red");
}

#[test]
fn partial_config_json_keeps_defaults() {
    let config: HeatmapConfig =
        serde_json::from_str(r#"{"original_title": "Before & after"}"#).unwrap();
    assert_eq!(config.original_title, "Before & after");
    assert_eq!(config.cell_size, HeatmapConfig::default().cell_size);

    let (seq, _) = build_sequence(0);
    let svg = render_year_svg(&seq, 2026, &config.original_title, &config);
    assert!(svg.contains("Before &amp; after 2026"));
}

#[test]
fn text_grid_has_a_row_per_weekday() {
    let (seq, _) = build_sequence(0);
    let text = render_year_text(&seq, 2024, &HeatmapConfig::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "2024");
    assert_eq!(lines.len(), 1 + 1 + 7 + 1);
    // 2024-01-01 is a Monday inside the January vacation.
    assert!(lines[2].starts_with("Seg v"));
    assert!(lines[8].starts_with("Dom ."));
    assert!(text.contains('X'));
    assert!(text.contains("X=STRIKE"));
}

#[test]
fn summary_dataframe_has_a_row_per_year() {
    let (seq, _) = build_sequence(0);
    let df = summary_dataframe(&seq).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 8);
    let strike = df.column("strike").unwrap().u32().unwrap();
    assert_eq!(strike.get(0), Some(45));
    assert_eq!(strike.get(1), Some(0));
    let years = df.column("year").unwrap().i32().unwrap();
    assert_eq!(years.get(2), Some(2026));
}

#[test]
fn summary_dataframe_matches_category_counts() {
    let simulation = simulate(&SimulationParams::default()).unwrap();
    let df = summary_dataframe(&simulation.rescheduled).unwrap();
    let counts = category_counts(&simulation.rescheduled);
    let names = ["sunday", "workday", "vacation", "pf", "pini", "pfim", "strike"];
    for (row, year_counts) in counts.iter().enumerate() {
        let year = df.column("year").unwrap().i32().unwrap().get(row);
        assert_eq!(year, Some(year_counts.year));
        for (ordinal, name) in names.iter().enumerate() {
            let column = df.column(name).unwrap().u32().unwrap();
            assert_eq!(column.get(row), Some(year_counts.counts[ordinal]), "{name}");
        }
    }
}

#[test]
fn heatmap_config_limits_cell_geometry() {
    assert!(HeatmapConfig::default().validate().is_ok());
    let zero = HeatmapConfig {
        cell_size: 0,
        ..HeatmapConfig::default()
    };
    assert_eq!(zero.validate().unwrap_err().name, "cell_size");
    let wide_gap = HeatmapConfig {
        cell_gap: 17,
        ..HeatmapConfig::default()
    };
    assert_eq!(wide_gap.validate().unwrap_err().max, 16);
}
