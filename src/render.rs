//! Static HTML rendering of the catalog views.
//!
//! Every view is a pure function from store state to [`Markup`]; nothing here
//! reads state back from markup. [`render_site`] writes all views at once:
//!
//! ```text
//! dist/
//! ├── index.html          # the persisted view mode
//! ├── gallery.html        # card grid
//! ├── editor.html         # one editable row per item, entry order
//! ├── infographic.html    # year matrix + histogram
//! ├── detail/
//! │   ├── 1.html          # one page per item of the sorted view
//! │   └── ...
//! └── years/
//!     ├── 1955.html       # items covering one year, ordered by code
//!     └── ...
//! ```
//!
//! CSS is the theme colors from config, the chart color endpoints, and the
//! embedded `static/style.css`. The theme is applied with a `data-theme`
//! attribute on the root element.
//!
//! Templates use [maud](https://maud.lambda.xyz/), so all item text is
//! escaped on interpolation.

use crate::config::{self, CatalogConfig};
use crate::i18n::{self, Language};
use crate::item::{Item, NAME_PLACEHOLDER};
use crate::prefs::{Theme, ViewMode};
use crate::sort::SortKey;
use crate::store::{Store, Visible};
use crate::years::{YearBuckets, YearSelection};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Everything a view needs besides the store.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a CatalogConfig,
    pub language: Language,
    pub theme: Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a CatalogConfig, language: Language, theme: Theme) -> Self {
        Self {
            config,
            language,
            theme,
        }
    }

    fn t(&self, key: &str) -> String {
        i18n::t(self.language, key, &[])
    }

    fn img_src(&self, image: &str) -> String {
        format!("{}{}", self.config.img_dir, image)
    }

    /// Stylesheet for every page.
    pub fn css(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            config::generate_color_css(&self.config.colors),
            config::generate_chart_css(&self.config.infographic),
            CSS_STATIC
        )
    }
}

/// Files written by [`render_site`], relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: Vec<PathBuf>,
    pub detail_pages: usize,
    pub year_pages: usize,
}

/// Write every view of `store` under `output_dir`.
///
/// `index.html` shows `mode`. Every year column of the infographic gets a
/// page, empty years included. The editor lists rows in file order, so its
/// `data-i` indices are the ones `edit` takes.
pub fn render_site(
    ctx: &RenderContext<'_>,
    store: &Store,
    mode: ViewMode,
    output_dir: &Path,
) -> Result<RenderSummary, RenderError> {
    let mut summary = RenderSummary::default();
    let selection = YearSelection::default();

    let views = [
        (ViewMode::Gallery, render_gallery_page(ctx, store, "")),
        (ViewMode::Editor, render_editor_page(ctx, store, "")),
        (
            ViewMode::Infographic,
            render_infographic_page(ctx, store, selection, ""),
        ),
    ];
    for (view, markup) in &views {
        let name = PathBuf::from(format!("{}.html", view.as_str()));
        write_page(&output_dir.join(&name), markup)?;
        summary.pages.push(name);
        if *view == mode {
            write_page(&output_dir.join("index.html"), markup)?;
            summary.pages.push(PathBuf::from("index.html"));
        }
    }

    for position in 0..store.len() {
        if let Some(markup) = render_detail_page(ctx, store, position as isize) {
            let name = PathBuf::from("detail").join(format!("{}.html", position + 1));
            write_page(&output_dir.join(&name), &markup)?;
            summary.detail_pages += 1;
        }
    }

    // The infographic only links year columns when something is visible.
    let visible = store.visible_items();
    if visible.entries().is_empty() {
        return Ok(summary);
    }
    let buckets = YearBuckets::build(visible.items(), ctx.config.infographic.years());
    for year in buckets.years() {
        let markup = render_year_page(ctx, store, &buckets, year);
        let name = PathBuf::from("years").join(format!("{year}.html"));
        write_page(&output_dir.join(&name), &markup)?;
        summary.year_pages += 1;
    }

    Ok(summary)
}

/// Write one page, creating parent directories as needed.
pub fn write_page(path: &Path, markup: &Markup) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &markup.0)?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(ctx: &RenderContext<'_>, title: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(ctx.language.code()) data-theme=(ctx.theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (ctx.css()) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

fn sort_label_key(key: SortKey) -> &'static str {
    match key {
        SortKey::Name => "sortByName",
        SortKey::Code => "sortByCode",
        SortKey::Year => "sortByYear",
    }
}

/// Renders the toolbar: view switcher, sort state, search text, filters.
///
/// `root` is the relative path back to the output directory.
fn toolbar(ctx: &RenderContext<'_>, store: &Store, active: Option<ViewMode>, root: &str) -> Markup {
    let sort = store.sort_state();
    let direction = if sort.descending {
        "sortDescending"
    } else {
        "sortAscending"
    };
    html! {
        header.toolbar {
            h1.toolbar-title { (ctx.t("catalog")) }
            nav.view-switch {
                @for mode in ViewMode::ALL {
                    a.active[active == Some(mode)] href={ (root) (mode.as_str()) ".html" } {
                        (ctx.t(mode.as_str()))
                    }
                }
            }
            div.sort-buttons {
                @for key in SortKey::ALL {
                    @let selected = key == sort.key;
                    span.sort-btn.active[selected] data-sort=(key.as_str()) {
                        (ctx.t(sort_label_key(key)))
                        @if selected {
                            " "
                            span.sort-arrow title=(ctx.t(direction)) {
                                @if sort.descending { "▼" } @else { "▲" }
                            }
                        }
                    }
                }
            }
            input.search type="search" readonly
                value=(store.query())
                placeholder=(ctx.t("searchPlaceholder"));
            span.favorites-filter.active[store.favorites_only()] {
                (if store.favorites_only() { "♥ " } else { "♡ " })
                (ctx.t("favorites"))
            }
            span.toolbar-prefs {
                (ctx.language.code())
                " · "
                (ctx.t(match ctx.theme {
                    Theme::Light => "themeLight",
                    Theme::Dark => "themeDark",
                }))
            }
        }
    }
}

fn empty_state(ctx: &RenderContext<'_>, visible: &Visible<'_>) -> Markup {
    html! {
        @if let Some(key) = visible.empty_message_key() {
            @if matches!(visible, Visible::NoData) {
                p.gallery-empty {
                    span.empty-load-btn { (ctx.t(key)) }
                }
            } @else {
                p.gallery-empty { (ctx.t(key)) }
            }
        }
    }
}

/// One gallery card. `href` points at the card's detail page.
fn gallery_card(ctx: &RenderContext<'_>, store: &Store, item: &Item, href: &str) -> Markup {
    let favorite = store.is_favorite(item);
    html! {
        div.gallery-card {
            span.card-fav.active[favorite]
                data-image=(item.image)
                title=(ctx.t("favorites"))
                aria-label=(ctx.t("favorites")) {
                @if favorite { "♥" } @else { "♡" }
            }
            a.gallery-card-photo href=(href) {
                img src=(ctx.img_src(&item.image))
                    alt=(item.name)
                    loading="lazy"
                    onerror="this.classList.add('missing')";
            }
            div.gallery-card-body {
                div.gallery-card-code { (item.code) }
                div.gallery-card-name { (item.display_name()) }
                div.gallery-card-meta { (item.year) }
            }
            @if !item.link.is_empty() {
                div.gallery-card-link {
                    a href=(item.link) target="_blank" rel="noopener" title=(ctx.t("link")) { "↗" }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// The page for a view mode, linked from the output directory root.
pub fn render_view(ctx: &RenderContext<'_>, store: &Store, mode: ViewMode) -> Markup {
    match mode {
        ViewMode::Gallery => render_gallery_page(ctx, store, ""),
        ViewMode::Editor => render_editor_page(ctx, store, ""),
        ViewMode::Infographic => render_infographic_page(ctx, store, YearSelection::default(), ""),
    }
}

/// Card grid of the visible items in sorted order.
pub fn render_gallery_page(ctx: &RenderContext<'_>, store: &Store, root: &str) -> Markup {
    let visible = store.visible_items();
    let content = html! {
        (toolbar(ctx, store, Some(ViewMode::Gallery), root))
        main.gallery {
            @if visible.entries().is_empty() {
                (empty_state(ctx, &visible))
            } @else {
                div.gallery-grid {
                    @for entry in visible.entries() {
                        @let position = store.sorted_position(entry.index).unwrap_or(0);
                        @let href = format!("{root}detail/{}.html", position + 1);
                        (gallery_card(ctx, store, entry.item, &href))
                    }
                }
            }
        }
    };
    base_document(ctx, &ctx.t("pageTitle"), "gallery-view", content)
}

/// Editor table in entry order. Rows that do not match the search are
/// hidden rather than dropped, so `data-i` always indexes the item list.
pub fn render_editor_page(ctx: &RenderContext<'_>, store: &Store, root: &str) -> Markup {
    let rows = store.editor_rows();
    let content = html! {
        (toolbar(ctx, store, Some(ViewMode::Editor), root))
        main.editor {
            table.editor-table {
                thead {
                    tr {
                        th { (ctx.t("preview")) }
                        th { (ctx.t("name")) }
                        th { (ctx.t("year")) }
                        th { (ctx.t("code")) }
                        th { (ctx.t("file")) }
                        th { (ctx.t("link")) }
                    }
                }
                tbody #tbody {
                    @if rows.is_empty() {
                        tr {
                            td.table-empty colspan="6" {
                                span.empty-load-btn { (ctx.t("loadJson")) }
                            }
                        }
                    }
                    @for row in &rows {
                        tr.search-hidden[row.hidden] data-i=(row.index) {
                            td.preview {
                                @if !row.item.image.is_empty() {
                                    img src=(ctx.img_src(&row.item.image))
                                        alt=""
                                        loading="lazy"
                                        onerror="this.classList.add('missing')";
                                }
                                span.no-img { (ctx.t("noImage")) }
                            }
                            (editor_cell(ctx, row.index, "name", &row.item.name, "modelNamePlaceholder"))
                            (editor_cell(ctx, row.index, "year", &row.item.year, "yearPlaceholder"))
                            (editor_cell(ctx, row.index, "code", &row.item.code, "codePlaceholder"))
                            (editor_cell(ctx, row.index, "image", &row.item.image, "imagePlaceholder"))
                            (editor_cell(ctx, row.index, "link", &row.item.link, "linkPlaceholder"))
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, &ctx.t("pageTitle"), "editor-view", content)
}

fn editor_cell(
    ctx: &RenderContext<'_>,
    index: usize,
    key: &str,
    value: &str,
    placeholder: &str,
) -> Markup {
    html! {
        td {
            input type="text" data-i=(index) data-key=(key) value=(value) placeholder=(ctx.t(placeholder));
        }
    }
}

/// Year matrix over the visible items with the histogram beneath it.
pub fn render_infographic_page(
    ctx: &RenderContext<'_>,
    store: &Store,
    selection: YearSelection,
    root: &str,
) -> Markup {
    let visible = store.visible_items();
    let content = html! {
        (toolbar(ctx, store, Some(ViewMode::Infographic), root))
        main.infographic {
            @if visible.entries().is_empty() {
                (empty_state(ctx, &visible))
            } @else {
                @let buckets = YearBuckets::build(visible.items(), ctx.config.infographic.years());
                (infographic_grid(ctx, &buckets, selection, root))
                (infographic_chart(ctx, &buckets, selection))
                @if let Some(year) = selection.selected() {
                    section.year-modal {
                        (year_gallery(ctx, store, &buckets, year, root))
                    }
                }
            }
        }
    };
    base_document(ctx, &ctx.t("pageTitle"), "infographic-view", content)
}

/// Two-digit column header: 1950 → "50".
fn year_header(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

fn truncate_name(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

fn infographic_grid(
    ctx: &RenderContext<'_>,
    buckets: &YearBuckets<'_>,
    selection: YearSelection,
    root: &str,
) -> Markup {
    let width = ctx.config.infographic.name_width;
    html! {
        div.infographic-grid {
            div.infographic-col.infographic-col-names {
                div.infographic-cell.model-name.infographic-col-header { (ctx.t("infographicModelCol")) }
                @for item in buckets.models() {
                    div.infographic-cell.model-name title=(item.name) {
                        (truncate_name(item.display_name(), width))
                    }
                }
            }
            @for year in buckets.years() {
                a.infographic-col.selected[selection.selected() == Some(year)]
                    data-year=(year)
                    href={ (root) "years/" (year) ".html" } {
                    div.infographic-cell.year-header { (year_header(year)) }
                    @for row in 0..buckets.models().len() {
                        div.infographic-cell.filled[buckets.is_filled(row, year)] {}
                    }
                }
            }
        }
    }
}

fn infographic_chart(
    ctx: &RenderContext<'_>,
    buckets: &YearBuckets<'_>,
    selection: YearSelection,
) -> Markup {
    let histogram = buckets.histogram();
    let colors = ctx.config.infographic.chart_colors();
    let unit = ctx.config.infographic.bar_unit_px as usize;
    html! {
        div.infographic-chart {
            div.infographic-chart-left { (ctx.t("infographicChartLabel")) }
            div.infographic-chart-right {
                div.infographic-chart-bars {
                    @for bar in &histogram.bars {
                        div.infographic-chart-cell {
                            div.infographic-chart-bar.selected[selection.selected() == Some(bar.year)]
                                data-year=(bar.year)
                                title=(bar.count)
                                style={
                                    "height:" (bar.count * unit) "px;"
                                    "background-color:" (colors.css(histogram.intensity(bar.count)))
                                } {}
                        }
                    }
                }
                div.infographic-chart-labels {
                    @for bar in &histogram.bars {
                        div.infographic-chart-value {
                            @if bar.count > 0 { (bar.count) }
                        }
                    }
                }
            }
        }
    }
}

/// Cards for the items covering `year`, ordered by code.
fn year_gallery(
    ctx: &RenderContext<'_>,
    store: &Store,
    buckets: &YearBuckets<'_>,
    year: i32,
    root: &str,
) -> Markup {
    let title = i18n::t(ctx.language, "yearModalTitle", &[("year", &year.to_string())]);
    html! {
        h2.year-modal-title { (title) }
        div.gallery-grid {
            @for item in buckets.bucket(year) {
                @let position = store
                    .data()
                    .iter()
                    .position(|candidate| std::ptr::eq(candidate, item))
                    .and_then(|index| store.sorted_position(index))
                    .unwrap_or(0);
                @let href = format!("{root}detail/{}.html", position + 1);
                (gallery_card(ctx, store, item, &href))
            }
        }
    }
}

/// Standalone page listing the items that cover `year`.
pub fn render_year_page(
    ctx: &RenderContext<'_>,
    store: &Store,
    buckets: &YearBuckets<'_>,
    year: i32,
) -> Markup {
    let content = html! {
        (toolbar(ctx, store, Some(ViewMode::Infographic), "../"))
        main.year-detail {
            (year_gallery(ctx, store, buckets, year, "../"))
        }
    };
    let title = i18n::t(ctx.language, "yearModalTitle", &[("year", &year.to_string())]);
    base_document(ctx, &title, "year-view", content)
}

/// Detail page for one position of the sorted view, wrapping at both ends.
///
/// `None` when the catalog is empty. Pages link to their neighbors as
/// `{n}.html` in the same directory (1-based).
pub fn render_detail_page(ctx: &RenderContext<'_>, store: &Store, position: isize) -> Option<Markup> {
    let detail = store.detail(position)?;
    let item = detail.item;
    let dash = |value: &str| {
        if value.is_empty() {
            NAME_PLACEHOLDER.to_string()
        } else {
            value.to_string()
        }
    };
    let content = html! {
        (toolbar(ctx, store, None, "../"))
        main.detail {
            h2.modal-title { (item.display_name()) }
            div.modal-photo-wrap {
                img.modal-photo src={ "../" (ctx.img_src(&item.image)) } alt=(item.name);
            }
            div.modal-data {
                dl.modal-info {
                    dt { (ctx.t("code")) }
                    dd { (dash(&item.code)) }
                    dt { (ctx.t("year")) }
                    dd { (dash(&item.year)) }
                    dt { (ctx.t("file")) }
                    dd { (dash(&item.image)) }
                    @if !item.link.is_empty() {
                        dt { (ctx.t("link")) }
                        dd {
                            a href=(item.link) target="_blank" rel="noopener" { (ctx.t("linkWord")) }
                        }
                    }
                }
            }
            @let hidden = !detail.has_navigation();
            a.modal-nav.modal-nav-left.modal-nav-hidden[hidden]
                href={ (detail.prev_position() + 1) ".html" } { "‹" }
            a.modal-nav.modal-nav-right.modal-nav-hidden[hidden]
                href={ (detail.next_position() + 1) ".html" } { "›" }
        }
    };
    Some(base_document(ctx, item.display_name(), "detail-view", content))
}
