use marquee_core::{
    AppViewModel, DetailView, EmptyReason, FeedFooter, ImageSize, Mode, ViewProjection,
};

/// Renders the view model as plain text lines for the terminal.
pub fn render(view: &AppViewModel, image_base: &str) -> Vec<String> {
    let mut lines = Vec::new();

    let header = match &view.mode {
        Mode::Browse => "== Popular ==".to_string(),
        Mode::Search { query } => format!("== Search: {query} =="),
    };
    lines.push(header);
    render_list(&view.list, image_base, &mut lines);

    if view.detail.id.is_some() {
        lines.push(String::new());
        render_detail(&view.detail, image_base, &mut lines);
    }
    lines
}

fn render_list(list: &ViewProjection, image_base: &str, lines: &mut Vec<String>) {
    for item in &list.items {
        let poster = item
            .poster_url(image_base, ImageSize::Small)
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:>8}  {}  [{}]  {}  {}",
            item.id.get(),
            item.title,
            item.rating_label(),
            item.release_label(),
            poster
        ));
    }

    match &list.empty_reason {
        Some(EmptyReason::NoResults { query }) => {
            lines.push(format!("No listings match \"{query}\"."));
        }
        Some(EmptyReason::NoDataYet) => lines.push("No listings yet.".to_string()),
        None => {}
    }
    if list.is_loading && list.items.is_empty() {
        lines.push("Loading...".to_string());
    }
    match list.footer {
        FeedFooter::Loading => lines.push("Loading more...".to_string()),
        FeedFooter::NoMore => lines.push("No more results.".to_string()),
        FeedFooter::Hidden => {}
    }
    if let Some(error) = &list.error {
        lines.push(format!("Error: {error} (type `refresh` or `more` to retry)"));
    }
}

fn render_detail(detail: &DetailView, image_base: &str, lines: &mut Vec<String>) {
    if detail.is_loading {
        lines.push("Loading details...".to_string());
        return;
    }
    let Some(item) = &detail.item else {
        let reason = detail.error.as_deref().unwrap_or("unknown error");
        lines.push(format!("Could not load details: {reason} (type `retry`)"));
        return;
    };

    lines.push(format!("-- {} --", item.title));
    lines.push(format!(
        "Released: {}  Rating: {}",
        item.release_label(),
        item.rating_label()
    ));
    if let Some(minutes) = item.runtime_minutes {
        lines.push(format!("Runtime: {minutes} min"));
    }
    if !item.genres.is_empty() {
        let genres: Vec<&str> = item.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("Genres: {}", genres.join(", ")));
    }
    if let Some(tagline) = &item.tagline {
        lines.push(format!("\"{tagline}\""));
    }
    if let Some(overview) = &item.overview {
        lines.push(overview.clone());
    }
    lines.push(format!("Poster: {}", item.poster_url(image_base)));
    for member in &detail.cast {
        lines.push(format!("  {} as {}", member.name, member.character));
    }
    if let Some(error) = &detail.error {
        lines.push(format!("Warning: {error}"));
    }
}
