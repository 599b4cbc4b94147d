use volunteer_rota::application::dto::CalendarPage;

pub fn show_calendar_page_debug_data(page: &CalendarPage) {
    println!("\n=======================================================");
    println!("🗓️ [DEBUG] {} ({} days, {:?})", page.title, page.days.len(), page.view);
    println!("=======================================================");

    for day in &page.days {
        if day.is_empty() {
            continue;
        }
        let flags = format!(
            "{}{}{}",
            if day.is_today { " today" } else { "" },
            if day.is_past { " past" } else { "" },
            if day.is_regular_day { " regular" } else { "" },
        );
        println!("📅 {}{}", day.date.format("%a %-d %b"), flags);

        for event in &day.events {
            println!("   ┣ event  {} {}", event.time_label(), event.title);
        }
        for shift in &day.filled {
            println!(
                "   ┣ filled {} {} -> {} (ID: {})",
                shift.time.label(),
                shift.role_or_default(),
                shift.status.volunteer_name().unwrap_or("?"),
                shift.id
            );
        }
        for group in &day.unfilled {
            println!(
                "   ┣ needed {} {} x{} ids={:?} virtual={}",
                group.label, group.role, group.count, group.backing_ids, group.is_virtual
            );
        }
    }
    println!("=======================================================\n");
}

pub fn show_digest_debug_data(digest: &Option<String>) {
    println!("\n=======================================================");
    match digest {
        Some(message) => println!("{}", message),
        None => println!("(nothing needed)"),
    }
    println!("=======================================================\n");
}
