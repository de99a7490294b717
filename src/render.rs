use std::fmt::Write;

use crate::nav::desktop::{DesktopLink, DesktopNode, DesktopView, DropdownPanel};
use crate::nav::mobile::{AccordionBody, LinkView, PanelNode, PanelView};
use crate::nav::{MenuConfig, ShellView};

pub fn shell(view: &ShellView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "viewport: {}", view.viewport);
    if let Some(hamburger) = view.hamburger {
        let state = if hamburger.expanded { "expanded" } else { "collapsed" };
        let _ = writeln!(out, "[≡] menu button ({state})");
    }
    if let Some(desktop) = &view.desktop {
        out.push_str(&desktop_bar(desktop));
    }
    if let Some(panel) = &view.mobile {
        out.push_str(&mobile_panel(panel));
    }
    out
}

fn desktop_link(link: &DesktopLink) -> String {
    match link.rel {
        Some(rel) => format!("{} -> {} (new tab, rel=\"{rel}\")", link.label, link.href),
        None => format!("{} -> {}", link.label, link.href),
    }
}

pub fn desktop_bar(view: &DesktopView) -> String {
    let mut out = String::from("desktop bar:\n");
    for node in &view.items {
        match node {
            DesktopNode::Link(link) => {
                let _ = writeln!(out, "  {}", desktop_link(link));
            }
            DesktopNode::Dropdown {
                label, open, panel, ..
            } => {
                let marker = if *open { "▴" } else { "▾" };
                let _ = writeln!(out, "  {label} {marker}");
                match panel {
                    Some(DropdownPanel::List(links)) => {
                        for link in links {
                            let _ = writeln!(out, "    {}", desktop_link(link));
                        }
                    }
                    Some(DropdownPanel::Mega(columns)) => {
                        for column in columns {
                            if let Some(heading) = &column.heading {
                                let _ = writeln!(out, "    [{heading}]");
                            }
                            for section in &column.sections {
                                let _ = writeln!(out, "      {}", desktop_link(&section.heading));
                                for link in &section.links {
                                    let _ = writeln!(out, "        {}", desktop_link(link));
                                }
                            }
                        }
                    }
                    Some(DropdownPanel::ComingSoon(text)) => {
                        let _ = writeln!(out, "    {text}");
                    }
                    None => {}
                }
            }
        }
    }
    out
}

fn panel_link(link: &LinkView) -> String {
    format!("{} -> {}  #{}", link.label, link.href, link.id)
}

pub fn mobile_panel(view: &PanelView) -> String {
    let mut out = String::from("mobile panel:\n");
    for node in &view.nodes {
        match node {
            PanelNode::Link(link) => {
                let _ = writeln!(out, "  {}", panel_link(link));
            }
            PanelNode::Accordion {
                label,
                toggle,
                chevron,
                body,
                ..
            } => {
                let _ = writeln!(out, "  {label} (chevron {chevron}°)  #{toggle}");
                match body {
                    Some(AccordionBody::Links(links)) => {
                        for link in links {
                            let _ = writeln!(out, "    {}", panel_link(link));
                        }
                    }
                    Some(AccordionBody::ComingSoon(text)) => {
                        let _ = writeln!(out, "    {text}");
                    }
                    None => {}
                }
            }
        }
    }
    for link in &view.calls_to_action {
        let _ = writeln!(out, "  [{}]", panel_link(link));
    }
    let _ = writeln!(out, "  [×] close  #{}", view.close_button);
    out
}

pub fn menu_tree(menu: &MenuConfig) -> String {
    let mut out = String::new();
    for item in &menu.items {
        let _ = writeln!(out, "{} -> {}", item.label, item.href);
        if item.has_dropdown && !item.is_mobile_accordion() {
            let _ = writeln!(out, "  (mobile: plain link)");
        }
        if let Some(mega) = &item.mega_menu {
            for column in &mega.columns {
                let heading = column.heading.as_deref().unwrap_or("-");
                let _ = writeln!(out, "  [{heading}]");
                for section in &column.sections {
                    let _ = writeln!(out, "    {} -> {}", section.heading, section.href);
                }
            }
        }
        for link in &item.dropdown_items {
            let _ = writeln!(out, "  {} -> {}", link.label, link.href);
        }
    }
    for link in &menu.calls_to_action {
        let _ = writeln!(out, "[{}] -> {}", link.label, link.href);
    }
    out
}
