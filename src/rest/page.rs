use actix_web::{http::StatusCode, web, HttpResponse};
use std::fmt::{self, Write};

use crate::service::{Nft, WalletOverview, WalletService};
use crate::utils::escape_html;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Wallet Overview</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<div class="page">
"#;

const PAGE_TAIL: &str = "</div>\n</body>\n</html>\n";

pub async fn index(service: web::Data<WalletService>) -> HttpResponse {
    match service.fetch_overview().await {
        Ok(overview) => match render_overview(&overview) {
            Ok(page) => html(StatusCode::OK, page),
            Err(err) => {
                error!("failed to render wallet page: address={} error={}", overview.address, err);
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(_) => html(StatusCode::BAD_GATEWAY, render_unavailable()),
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn render_overview(overview: &WalletOverview) -> Result<String, fmt::Error> {
    let mut out = String::from(PAGE_HEAD);

    out.push_str("<h1>Wallet Overview</h1>\n<section class=\"wallet\">\n");
    writeln!(out, "<p>Address: {}</p>", escape_html(&overview.address))?;
    writeln!(
        out,
        "<p>Stake Address: {}</p>",
        escape_html(overview.stake_address.as_deref().unwrap_or("-"))
    )?;
    writeln!(out, "<p>ADA Balance: {:.2} ADA</p>", overview.ada_balance)?;
    out.push_str("</section>\n");

    writeln!(out, "<h2>NFTs ({})</h2>", overview.nfts.len())?;
    if overview.nfts.is_empty() {
        out.push_str("<p class=\"empty\">No NFTs held by this wallet.</p>\n");
    } else {
        out.push_str("<section class=\"nft-grid\">\n");
        for nft in overview.nfts.iter() {
            render_card(&mut out, nft)?;
        }
        out.push_str("</section>\n");
    }

    out.push_str(PAGE_TAIL);
    Ok(out)
}

fn render_card(out: &mut String, nft: &Nft) -> fmt::Result {
    let name = escape_html(&nft.asset);
    out.push_str("<article class=\"nft-card\">\n");
    match &nft.image {
        Some(image) => writeln!(
            out,
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape_html(image),
            name
        )?,
        None => out.push_str("<div class=\"nft-placeholder\">No image</div>\n"),
    }
    writeln!(out, "<h3 title=\"{}\">{}</h3>", escape_html(&nft.asset_id), name)?;
    writeln!(out, "<p class=\"price\">{:.2} ADA</p>", nft.price)?;
    out.push_str("</article>\n");
    Ok(())
}

pub fn render_unavailable() -> String {
    let mut out = String::from(PAGE_HEAD);
    out.push_str("<h1>Wallet Overview</h1>\n");
    out.push_str("<p class=\"error\">Failed to fetch wallet info. Please try again later.</p>\n");
    out.push_str(PAGE_TAIL);
    out
}
