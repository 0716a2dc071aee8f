// URL builders for every remote dataset the reporting run touches

pub const DATA_DRAGON_CDN: &str = "http://ddragon.leagueoflegends.com/cdn";

pub fn performances(base: &str, division: &str) -> String {
    format!("{}/performances/{}", base, division)
}

pub fn team_performances(base: &str, division: &str) -> String {
    format!("{}/teamperformances/{}", base, division)
}

pub fn teams(base: &str, division: &str) -> String {
    format!("{}/teams/{}", base, division)
}

pub fn match_details(base: &str, match_id: &str) -> String {
    format!("{}/match/{}", base, match_id)
}

pub fn summoner_by_puuid(region: &str, puuid: &str, api_key: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/summoner/v4/summoners/by-puuid/{}?api_key={}",
        region, puuid, api_key
    )
}

pub fn champion_data(version: &str) -> String {
    format!("{}/{}/data/en_US/champion.json", DATA_DRAGON_CDN, version)
}

pub fn champion_icon(version: &str, icon_id: &str) -> String {
    format!("{}/{}/img/champion/{}.png", DATA_DRAGON_CDN, version, icon_id)
}
