use anyhow::Result;

use crate::models::{RankedEntry, TeamReport};
use crate::services::{AggregationEngine, TeamResolver};
use crate::store::RecordStore;
use crate::utils::{text_bar, validate_team_name};

const BAR_WIDTH: usize = 30;

pub fn list_teams(store: &RecordStore) -> Result<()> {
    let resolver = TeamResolver::from_store(store);

    println!("🏏 IPL Teams ({} matches on record):\n", store.len());
    for team in resolver.list_teams() {
        let code = TeamResolver::short_code(team);
        if code.is_empty() {
            println!("   • {}", team);
        } else {
            println!("   • {} ({})", team, code);
        }
    }

    println!("\n💡 Use 'iplboard team --name <team_name>' to see a team's report");
    Ok(())
}

pub fn show_team(store: &RecordStore, query: &str) -> Result<()> {
    if !validate_team_name(query) {
        anyhow::bail!("Team name must be between 1 and 100 characters");
    }

    let resolver = TeamResolver::from_store(store);
    let Some(team) = resolver.resolve(query) else {
        println!("❌ No team named '{}'", query.trim());
        println!("\n💡 Did you mean:");
        for suggestion in resolver.suggest(query, 3) {
            println!("   • {}", suggestion);
        }
        return Ok(());
    };

    let report = AggregationEngine::new().team_report(store, team);
    print_report(&report);
    Ok(())
}

pub fn show_leaders(store: &RecordStore) -> Result<()> {
    let engine = AggregationEngine::new();

    println!("🏁 Most Successful Chase Teams (Top 5)");
    print_ranked(&engine.top_chasing_teams(store), "wins while chasing");

    println!("\n🥇 Overall Top 5 Player of the Match Winners");
    print_ranked(&engine.top_award_winners_overall(store), "awards");

    Ok(())
}

fn print_ranked(entries: &[RankedEntry], unit: &str) {
    if entries.is_empty() {
        println!("   No data");
        return;
    }
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "   {}. {:<width$}  {:>3} {}  {}",
            i + 1,
            entry.name,
            entry.count,
            unit,
            text_bar(entry.count, max, BAR_WIDTH),
            width = width
        );
    }
}

fn print_report(report: &TeamReport) {
    if report.short_code.is_empty() {
        println!("📊 Insights for {}\n", report.team);
    } else {
        println!("📊 Insights for {} ({})\n", report.team, report.short_code);
    }

    println!("🏅 Top 5 Player of the Match Awards");
    print_ranked(&report.top_award_winners, "awards");

    println!("\n📆 Matches Won per Season");
    if report.wins_per_season.is_empty() {
        println!("   No data");
    } else {
        let max = report.wins_per_season.iter().map(|s| s.wins).max().unwrap_or(0);
        for season in &report.wins_per_season {
            println!(
                "   {:<8} {:>3}  {}",
                season.season,
                season.wins,
                text_bar(season.wins, max, BAR_WIDTH)
            );
        }
    }

    println!("\n📊 Winning Style");
    if report.winning_style.is_empty() {
        println!("   No data");
    } else {
        for style in &report.winning_style {
            println!("   by {:<10} {:>3}", style.result, style.count);
        }
    }

    println!("\n⚔️  1st vs 2nd Innings Wins");
    println!("   1st innings: {}", report.innings.first_innings_wins);
    println!("   2nd innings: {}", report.innings.second_innings_wins);
    println!("   Total wins:  {}", report.innings.total());

    println!("\n🪙 Toss Wins vs Match Wins After Toss Win");
    println!("   🎯 Tosses Won:              {}", report.toss.total_tosses_won);
    println!("   ✅ Matches Won After Toss:  {}", report.toss.matches_won_after_toss);
    println!("   📊 Win % After Toss:        {}%", report.toss.win_pct);

    println!("\n🏆 IPL Trophy Count");
    for line in report.trophy_announcement.lines().filter(|l| !l.is_empty()) {
        println!("   {}", line);
    }

    println!("\n🏁 Most Successful Chase Teams (Top 5)");
    print_ranked(&report.top_chasing_teams, "wins while chasing");

    println!("\n🥇 Overall Top 5 Player of the Match Winners");
    print_ranked(&report.top_award_winners_overall, "awards");
}
