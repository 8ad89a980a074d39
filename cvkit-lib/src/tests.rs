#[cfg(test)]
mod render_property_tests {
    use crate::*;

    const CHEN_CHUANGYI: &str = r#"{"profile": {"name": "陈创意", "title": "品牌策划"}, "education": [], "experience": [], "portfolio": [], "skills": {"professional": [], "software": [], "languages": []}, "awards": []}"#;

    fn populated() -> Profile {
        parse_profile(
            r#"{
            "profile": {
                "name": "张三", "title": "新闻记者", "phone": "13800138000",
                "email": "zhangsan@example.com", "wechat": "zhangsan_news",
                "portfolio_url": "https://portfolio.example.com/zhangsan",
                "location": "广州", "avatar_url": "https://img.example.com/a.png"
            },
            "education": [
                {"school": "汕头大学", "degree": "新闻学 本科", "time": "2021-2025", "details": ["GPA 3.8", "一等奖学金"]},
                {"school": "某高中", "degree": "高中", "time": "2018-2021", "details": ["校报主编"]}
            ],
            "experience": [
                {"company": "南方都市报", "role": "实习记者", "time": "2024.07", "details": ["突发新闻 10 个现场"]},
                {"company": "汕头大学校报", "role": "学生记者", "time": "2022.09", "details": ["采访 50 多位师生", "写了 30 篇稿子"]},
                {"company": "汕头电视台", "role": "编导实习", "time": "2023.07", "details": ["剪辑新闻片", "Covered the \"Two Sessions\" live"]}
            ],
            "portfolio": [
                {"title": "城中村调查", "role": "记者", "link": "https://example.com/1", "desc": "深度报道"},
                {"title": "毕业生去向", "role": "策划", "link": "https://example.com/2", "desc": "专题"}
            ],
            "skills": {"professional": ["新闻采访", "事实核查"], "software": ["Python", "Premiere"], "languages": ["英语六级"]},
            "awards": ["校级优秀学生记者", "新闻写作比赛二等奖", "优秀毕业生", "Dean's List 2024"]
        }"#,
        )
        .unwrap()
    }

    fn every_string(profile: &Profile) -> Vec<String> {
        let contact = &profile.profile;
        let mut strings: Vec<String> = [
            &contact.name,
            &contact.title,
            &contact.phone,
            &contact.email,
            &contact.wechat,
            &contact.portfolio_url,
            &contact.location,
            &contact.avatar_url,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
        for e in &profile.education {
            strings.extend(e.details.iter().cloned());
        }
        for e in &profile.experience {
            strings.extend(e.details.iter().cloned());
        }
        strings.extend(profile.skills.professional.iter().cloned());
        strings.extend(profile.skills.software.iter().cloned());
        strings.extend(profile.skills.languages.iter().cloned());
        strings.extend(profile.awards.iter().cloned());
        strings
    }

    fn assert_in_order(html: &str, needles: &[&str]) {
        let mut last = 0;
        for needle in needles {
            let at = html[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", needle));
            last += at + needle.len();
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let profile = populated();
        for variant in Variant::ALL {
            let first = render(&profile, variant, &RenderOptions::default());
            let second = render(&profile, variant, &RenderOptions::default());
            assert_eq!(first, second, "{variant} output differs between runs");
        }
    }

    #[test]
    fn test_render_does_not_mutate_input() {
        let profile = populated();
        let before = profile.clone();
        let _ = render(&profile, Variant::Advertising, &RenderOptions::default());
        assert_eq!(profile, before);
    }

    #[test]
    fn test_every_populated_string_appears_verbatim() {
        let profile = populated();
        for variant in Variant::ALL {
            let html = render(&profile, variant, &RenderOptions::default());
            for s in every_string(&profile) {
                assert!(html.contains(&s), "{variant} output is missing '{s}'");
            }
            assert!(html.contains("<li>Dean's List 2024</li>"));
            assert!(html.contains("<li>Covered the \"Two Sessions\" live</li>"));
        }
    }

    #[test]
    fn test_list_order_is_preserved() {
        let profile = populated();
        for variant in Variant::ALL {
            let html = render(&profile, variant, &RenderOptions::default());
            assert_in_order(&html, &["新闻学 本科", "校报主编"]);
            assert_in_order(&html, &["南方都市报", "汕头大学校报", "汕头电视台"]);
            assert_in_order(&html, &["城中村调查", "毕业生去向"]);
            assert_in_order(&html, &["校级优秀学生记者", "新闻写作比赛二等奖", "优秀毕业生"]);
        }
    }

    #[test]
    fn test_empty_portfolio_emits_no_portfolio_markup() {
        let mut profile = populated();
        profile.portfolio.clear();
        for variant in Variant::ALL {
            let html = render(&profile, variant, &RenderOptions::default());
            assert!(!html.contains("id=\"portfolio\""), "{variant} rendered a portfolio section");
            assert!(!html.contains("class=\"works\""));
            assert!(!html.contains("作品集"));
        }
    }

    #[test]
    fn test_advertising_end_to_end() {
        let profile = parse_profile(CHEN_CHUANGYI).unwrap();
        let html = render(&profile, Variant::Advertising, &RenderOptions::default());

        assert!(html.contains("陈创意"));
        assert!(html.contains("品牌策划"));
        assert!(html.contains(Theme::Rose.color()));
        assert!(html.contains("theme-rose"));
        for id in ["education", "experience", "portfolio", "skills", "awards"] {
            assert!(!html.contains(&format!("id=\"{}\"", id)), "empty {id} section rendered");
        }
    }

    #[test]
    fn test_malformed_json_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        for bad in [r#"{"awards": ["a",]}"#, r#"{"profile": {"name": "x""#] {
            let path = dir.path().join("out.html");
            let err = render_json_to_file(bad, Variant::Journalism, &RenderOptions::default(), &path).unwrap_err();
            assert!(matches!(err, CvError::Parse { .. }));
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_meta_hints_override_variant_preset() {
        let profile = parse_profile(r##"{"meta": {"theme_color": "#2563eb", "layout": "classic"}, "profile": {"name": "赵六"}}"##).unwrap();
        let html = render(&profile, Variant::Advertising, &RenderOptions::default());
        assert!(html.contains("--accent: #2563eb;"));
        assert!(html.contains("layout-classic"));
        assert!(!html.contains("<aside"));
    }

    #[test]
    fn test_samples_render_in_their_own_variant() {
        for variant in Variant::ALL {
            let profile = variant.sample_profile().unwrap();
            let html = render(&profile, variant, &RenderOptions::default());
            assert!(html.contains(&format!("data-variant=\"{}\"", variant)));
            assert!(html.contains(&format!("layout-{}", variant.preset().layout)));
            for s in every_string(&profile) {
                assert!(html.contains(&s), "{variant} sample lost '{s}'");
            }
        }
    }
}
