//! Listing, paging, sorting and searching through the rendered table.

use kittest::Queryable;
use roster_business::{EmployeeListCompute, EmployeeTableCompute, workflow};

use crate::common::{TestCtx, staff};

mod common;

#[tokio::test]
async fn first_frame_loads_and_shows_first_page() {
    let mut ctx = TestCtx::new_app(staff(7)).await;
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("Employees").is_some(), "heading");
    for name in ["Employee 1", "Employee 5"] {
        assert!(harness.query_by_label(name).is_some(), "{name} on page 1");
    }
    assert!(
        harness.query_by_label("Employee 6").is_none(),
        "Employee 6 belongs to page 2"
    );
    assert!(harness.query_by_label("Page 1 of 2").is_some());
    assert_eq!(ctx.request_count("GET").await, 1, "loaded exactly once");
}

#[tokio::test]
async fn next_and_first_buttons_move_pages() {
    let mut ctx = TestCtx::new_app(staff(7)).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Next").click();
    ctx.settle().await;
    {
        let harness = ctx.harness();
        assert!(harness.query_by_label("Employee 6").is_some());
        assert!(harness.query_by_label("Employee 1").is_none());
        assert!(harness.query_by_label("Page 2 of 2").is_some());
    }

    ctx.harness_mut().get_by_label("First").click();
    ctx.settle().await;
    assert!(ctx.harness().query_by_label("Employee 1").is_some());
}

#[tokio::test]
async fn header_clicks_cycle_sort() {
    let mut ctx = TestCtx::new_app(staff(7)).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("EmployeeId").click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label_contains("EmployeeId").click();
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("EmployeeId ▼").is_some());
    assert!(harness.query_by_label("Employee 7").is_some());
    assert!(harness.query_by_label("Employee 1").is_none());

    let view = harness.state().state().ctx.compute::<EmployeeTableCompute>();
    let first_id = view.rows.first().and_then(|employee| employee.employee_id);
    assert_eq!(first_id, Some(7));
}

#[tokio::test]
async fn search_filters_rows() {
    let mut ctx = TestCtx::new_app(staff(7)).await;
    ctx.settle().await;

    workflow::set_global_filter(&mut ctx.harness_mut().state_mut().state_mut().ctx, "grace");
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("Employee 2").is_some());
    assert!(harness.query_by_label("Employee 6").is_some());
    assert!(harness.query_by_label("Employee 1").is_none());
    assert!(harness.query_by_label("Page 1 of 1").is_some());
}

#[tokio::test]
async fn refresh_button_reloads() {
    let mut ctx = TestCtx::new_app(staff(2)).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Refresh").click();
    ctx.settle().await;

    assert_eq!(ctx.request_count("GET").await, 2);
}

#[tokio::test]
async fn failed_load_shows_error() {
    let mut ctx = TestCtx::new_app_without_list().await;
    ctx.settle().await;

    let list = ctx
        .harness()
        .state()
        .state()
        .ctx
        .compute::<EmployeeListCompute>()
        .clone();
    assert!(list.error().is_some(), "unmocked list should fail: {list:?}");
    assert!(ctx.harness().query_by_label_contains("Error:").is_some());
    assert!(ctx.harness().query_by_label("No employees").is_some());
}
