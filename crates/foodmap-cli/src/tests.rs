use super::*;

#[test]
fn parses_tags_command() {
    let cli = Cli::try_parse_from(["foodmap", "tags"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Tags));
}

#[test]
fn search_defaults_to_no_filters() {
    let cli = Cli::try_parse_from(["foodmap", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search {
            ref keyword,
            price: None,
            ref tags,
            unset_price: None,
            json: false,
        } if keyword.is_empty() && tags.is_empty()
    ));
}

#[test]
fn search_collects_repeated_tags() {
    let cli = Cli::try_parse_from([
        "foodmap", "search", "--keyword", "Cafe", "--price", "2", "--tag", "coffee", "--tag",
        "bar",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            ref keyword,
            price: Some(2),
            ref tags,
            ..
        } if keyword == "Cafe" && tags == &["coffee", "bar"]
    ));
}

#[test]
fn search_parses_unset_price_policy() {
    let cli = Cli::try_parse_from(["foodmap", "search", "--unset-price", "hide-all"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            unset_price: Some(UnsetPricePolicy::HideAll),
            ..
        }
    ));
}

#[test]
fn search_rejects_unknown_unset_price_policy() {
    let result = Cli::try_parse_from(["foodmap", "search", "--unset-price", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn search_rejects_non_numeric_price() {
    let result = Cli::try_parse_from(["foodmap", "search", "--price", "$$"]);
    assert!(result.is_err());
}

#[test]
fn parses_show_command() {
    let cli = Cli::try_parse_from(["foodmap", "show", "5e1f", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Show { ref id, json: true } if id == "5e1f"
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["foodmap"]).is_err());
}
