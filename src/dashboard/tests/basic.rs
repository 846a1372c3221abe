//! Construction and basic widget operations.

use super::{drain, headless, headless_with, layout_of, recording, recording_with, widget};
use crate::error::DashboardError;
use crate::model::{ColumnCount, Widget, WidgetId};
use crate::test_utils::SurfaceCall;

#[test]
fn test_new_dashboard_has_one_default_band() {
    let dashboard = headless();
    assert_eq!(dashboard.band_count(), 1);
    let band = dashboard.band(0).unwrap();
    assert_eq!(band.column_count(), ColumnCount::TWO);
    assert_eq!(band.height(), 90);
    assert!(band.is_empty());
    assert_eq!(dashboard.widget_count(), 0);
    assert_eq!(dashboard.revision(), 0);
}

#[test]
fn test_new_dashboard_creates_band_element() {
    let dashboard = recording();
    let id = dashboard.band(0).unwrap().id();
    assert_eq!(
        dashboard.surface().calls,
        vec![
            SurfaceCall::CreateBand(id, 0, 90),
            SurfaceCall::ColumnClass(id, ColumnCount::TWO),
        ]
    );
}

#[test]
fn test_add_widget_fills_first_band_then_appends_band() {
    let mut dashboard = headless();
    assert_eq!(dashboard.add_widget(widget("1")), Ok(0));
    assert_eq!(dashboard.add_widget(widget("2")), Ok(0));
    assert_eq!(dashboard.add_widget(widget("3")), Ok(1));

    assert_eq!(layout_of(&dashboard), vec![vec!["1", "2"], vec!["3"]]);
    let second = dashboard.band(1).unwrap();
    assert_eq!(second.column_count(), ColumnCount::TWO);
    assert_eq!(second.height(), 90);
}

#[test]
fn test_add_widget_uses_first_band_with_room() {
    let mut dashboard = headless_with(&[
        (ColumnCount::ONE, &["a"]),
        (ColumnCount::THREE, &["b"]),
        (ColumnCount::TWO, &["c"]),
    ]);
    assert_eq!(dashboard.add_widget(widget("d")), Ok(1));
    assert_eq!(
        layout_of(&dashboard),
        vec![vec!["a"], vec!["b", "d"], vec!["c"]]
    );
}

#[test]
fn test_add_widget_rejects_duplicate_id() {
    let mut dashboard = headless();
    dashboard.add_widget(widget("1")).unwrap();
    let mut rx = dashboard.subscribe();

    let result = dashboard.add_widget(Widget::new(1u64, "Other", "other"));
    assert_eq!(
        result,
        Err(DashboardError::DuplicateWidgetId {
            id: WidgetId::from("1")
        })
    );
    assert_eq!(dashboard.widget_count(), 1);
    assert_eq!(drain(&mut rx), 0);
}

#[test]
fn test_add_widget_in_edit_mode_is_rejected() {
    let mut dashboard = headless();
    let mut rx = dashboard.subscribe();
    dashboard.enter_band_edit_mode().unwrap();

    let before = dashboard.as_document();
    assert_eq!(
        dashboard.add_widget(widget("1")),
        Err(DashboardError::EditModeActive)
    );
    assert_eq!(dashboard.as_document(), before);
    assert_eq!(drain(&mut rx), 0);
}

#[test]
fn test_add_widget_renders_and_positions() {
    let mut dashboard = recording();
    dashboard.add_widget(widget("1")).unwrap();
    dashboard.add_widget(widget("2")).unwrap();

    let surface = dashboard.surface();
    assert_eq!(surface.renders_of("2"), vec!["widgets/2/?idWidget=2"]);
    assert_eq!(surface.last_position("1"), Some(0));
    assert_eq!(surface.last_position("2"), Some(112));
}

#[test]
fn test_add_widget_in_band_ignores_capacity() {
    let mut dashboard = headless_with(&[(ColumnCount::ONE, &["a"]), (ColumnCount::TWO, &["b"])]);
    dashboard.add_widget_in_band(widget("c"), 0).unwrap();
    assert_eq!(layout_of(&dashboard), vec![vec!["a", "c"], vec!["b"]]);
}

#[test]
fn test_add_widget_in_band_rejects_bad_index() {
    let mut dashboard = headless();
    let mut rx = dashboard.subscribe();
    assert_eq!(
        dashboard.add_widget_in_band(widget("a"), 5),
        Err(DashboardError::InvalidBandIndex {
            index: 5,
            band_count: 1
        })
    );
    assert_eq!(dashboard.widget_count(), 0);
    assert_eq!(drain(&mut rx), 0);
}

#[test]
fn test_add_widget_in_band_rejects_duplicate() {
    let mut dashboard = headless_with(&[(ColumnCount::TWO, &["a"])]);
    assert!(matches!(
        dashboard.add_widget_in_band(widget("a"), 0),
        Err(DashboardError::DuplicateWidgetId { .. })
    ));
}

#[test]
fn test_update_widget_title() {
    let mut dashboard = recording_with(&[(ColumnCount::TWO, &["a"])]);
    let mut rx = dashboard.subscribe();
    let id = WidgetId::from("a");

    assert_eq!(dashboard.update_widget_title(&id, "Renamed"), Ok(true));
    assert_eq!(dashboard.find_widget(&id).unwrap().title, "Renamed");
    assert!(dashboard
        .surface()
        .calls
        .contains(&SurfaceCall::SetTitle(id.clone(), "Renamed".to_string())));
    assert_eq!(drain(&mut rx), 1);

    assert_eq!(dashboard.update_widget_title(&id, "Renamed"), Ok(false));
    assert_eq!(drain(&mut rx), 0);
}

#[test]
fn test_update_widget_title_unknown_widget() {
    let mut dashboard = headless();
    assert_eq!(
        dashboard.update_widget_title(&WidgetId::from("nope"), "x"),
        Err(DashboardError::UnknownWidgetReference {
            id: WidgetId::from("nope")
        })
    );
}

#[test]
fn test_delete_sole_widget_keeps_sole_band() {
    let mut dashboard = headless();
    dashboard.add_widget(widget("1")).unwrap();
    let mut rx = dashboard.subscribe();

    dashboard.delete_widget(&WidgetId::from("1")).unwrap();
    assert_eq!(dashboard.band_count(), 1);
    assert!(dashboard.band(0).unwrap().is_empty());
    assert_eq!(drain(&mut rx), 1);
}

#[test]
fn test_delete_widget_purges_emptied_band() {
    let mut dashboard = recording_with(&[
        (ColumnCount::ONE, &["1"]),
        (ColumnCount::ONE, &["2"]),
        (ColumnCount::ONE, &["3"]),
    ]);
    let middle = dashboard.band(1).unwrap().id();

    dashboard.delete_widget(&WidgetId::from("2")).unwrap();
    assert_eq!(layout_of(&dashboard), vec![vec!["1"], vec!["3"]]);
    let calls = &dashboard.surface().calls;
    assert!(calls.contains(&SurfaceCall::DestroyWidget(WidgetId::from("2"))));
    assert!(calls.contains(&SurfaceCall::DestroyBand(middle)));
}

#[test]
fn test_delete_widget_repositions_remaining() {
    let mut dashboard = recording_with(&[(ColumnCount::THREE, &["a", "b", "c"])]);
    dashboard.delete_widget(&WidgetId::from("a")).unwrap();
    assert_eq!(dashboard.surface().last_position("b"), Some(0));
    assert_eq!(dashboard.surface().last_position("c"), Some(112));
}

#[test]
fn test_delete_unknown_widget_is_rejected() {
    let mut dashboard = headless_with(&[(ColumnCount::TWO, &["a"])]);
    let revision = dashboard.revision();
    assert!(matches!(
        dashboard.delete_widget(&WidgetId::from("b")),
        Err(DashboardError::UnknownWidgetReference { .. })
    ));
    assert_eq!(dashboard.revision(), revision);
}

#[test]
fn test_delete_widget_in_edit_mode_is_rejected() {
    let mut dashboard = headless_with(&[(ColumnCount::TWO, &["a"])]);
    dashboard.enter_band_edit_mode().unwrap();
    assert_eq!(
        dashboard.delete_widget(&WidgetId::from("a")),
        Err(DashboardError::EditModeActive)
    );
    assert_eq!(dashboard.widget_count(), 1);
}

#[test]
fn test_clear_dashboard_resets_without_change() {
    let mut dashboard = headless_with(&[(ColumnCount::ONE, &["a"]), (ColumnCount::TWO, &["b"])]);
    dashboard.enter_band_edit_mode().unwrap();
    let mut rx = dashboard.subscribe();

    dashboard.clear_dashboard();
    assert!(!dashboard.is_band_editing());
    assert_eq!(dashboard.band_count(), 1);
    assert_eq!(dashboard.widget_count(), 0);
    assert_eq!(dashboard.band(0).unwrap().column_count(), ColumnCount::TWO);
    assert_eq!(drain(&mut rx), 0);
}

#[test]
fn test_clear_dashboard_cancels_drag() {
    let mut dashboard = recording_with(&[(ColumnCount::TWO, &["a", "b"])]);
    dashboard.begin_drag(&WidgetId::from("a")).unwrap();
    dashboard.clear_dashboard();
    assert!(dashboard.drag().is_none());
    assert!(dashboard.surface().calls.contains(&SurfaceCall::ClearSlots));
}

#[test]
fn test_find_widget_reports_position() {
    let dashboard = headless_with(&[(ColumnCount::ONE, &["a"]), (ColumnCount::TWO, &["b", "c"])]);
    let found = dashboard.find_widget(&WidgetId::from("c")).unwrap();
    assert_eq!(found.band_index, 1);
    assert_eq!(found.index_in_band, 1);
    assert_eq!(found.render_url, "widgets/c");
    assert!(dashboard.find_widget(&WidgetId::from("z")).is_none());
}
