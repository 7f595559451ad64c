use parent_planner::catalog::*;
use parent_planner::engine::*;
use parent_planner::models::*;
use speculate2::speculate;

fn situation(status: RelationshipStatus) -> UserSituation {
    UserSituation {
        relationship_status: status,
        pregnancy_stage: None,
        child_age: None,
        has_paternity_certificate: false,
        has_joint_custody: false,
        relationship_stable: true,
        city: None,
    }
}

fn item(id: &str, title: &str, stage: PlanningStage, urgency: Urgency) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        stage,
        urgency,
        estimated_time: None,
        location: None,
        cost: None,
        deadline: None,
        help_link: None,
    }
}

fn guide(slug: &str, stage: PlanningStage) -> PlanningGuide {
    PlanningGuide {
        slug: slug.to_string(),
        title: slug.to_string(),
        excerpt: String::new(),
        stage,
        urgency: Urgency::Medium,
        published: "2024-01-01".to_string(),
        read_time: "1 min".to_string(),
        content: String::new(),
    }
}

fn resource(city: &str) -> CityResource {
    let contact = ContactRecord {
        name: format!("Office {}", city),
        address: city.to_string(),
        phone: None,
        email: None,
        website: None,
        opening_hours: None,
    };
    CityResource {
        city: city.to_string(),
        postcode: "00000".to_string(),
        standesamt: contact.clone(),
        jugendamt: contact,
        notes: None,
    }
}

fn ids(items: &[ChecklistItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

const STATUSES: [RelationshipStatus; 4] = [
    RelationshipStatus::Married,
    RelationshipStatus::Unmarried,
    RelationshipStatus::Separated,
    RelationshipStatus::Other,
];

const PREGNANCY: [Option<PregnancyStage>; 6] = [
    None,
    Some(PregnancyStage::Planning),
    Some(PregnancyStage::FirstTrimester),
    Some(PregnancyStage::SecondTrimester),
    Some(PregnancyStage::ThirdTrimester),
    Some(PregnancyStage::Postpartum),
];

const CHILD_AGES: [Option<ChildAge>; 7] = [
    None,
    Some(ChildAge::NotBorn),
    Some(ChildAge::ZeroToThreeMonths),
    Some(ChildAge::ThreeToSixMonths),
    Some(ChildAge::SixToTwelveMonths),
    Some(ChildAge::OneToTwoYears),
    Some(ChildAge::Older),
];

/// Every combination of the situation fields.
fn all_situations() -> Vec<UserSituation> {
    let mut all = vec![];
    for status in STATUSES {
        for pregnancy_stage in PREGNANCY {
            for child_age in CHILD_AGES {
                for flags in 0..8u8 {
                    all.push(UserSituation {
                        relationship_status: status,
                        pregnancy_stage,
                        child_age,
                        has_paternity_certificate: flags & 1 != 0,
                        has_joint_custody: flags & 2 != 0,
                        relationship_stable: flags & 4 != 0,
                        city: None,
                    });
                }
            }
        }
    }
    all
}

speculate! {
    before {
        let catalog = Catalog::seeded();
    }

    describe "determine_stage" {
        it "returns early-warning for every unstable situation" {
            for s in all_situations().iter().filter(|s| !s.relationship_stable) {
                assert_eq!(determine_stage(s), PlanningStage::EarlyWarning);
            }
        }

        it "maps planning to expecting" {
            let s = UserSituation {
                pregnancy_stage: Some(PregnancyStage::Planning),
                ..situation(RelationshipStatus::Married)
            };
            assert_eq!(determine_stage(&s), PlanningStage::Expecting);
        }

        it "maps a newborn to at-birth" {
            let s = UserSituation {
                child_age: Some(ChildAge::ZeroToThreeMonths),
                ..situation(RelationshipStatus::Married)
            };
            assert_eq!(determine_stage(&s), PlanningStage::AtBirth);
        }

        it "maps six to twelve months to first-year" {
            let s = UserSituation {
                child_age: Some(ChildAge::SixToTwelveMonths),
                ..situation(RelationshipStatus::Unmarried)
            };
            assert_eq!(determine_stage(&s), PlanningStage::FirstYear);
        }

        it "maps older children to first-year when stable" {
            for age in [ChildAge::OneToTwoYears, ChildAge::Older, ChildAge::ThreeToSixMonths] {
                let s = UserSituation {
                    child_age: Some(age),
                    ..situation(RelationshipStatus::Separated)
                };
                assert_eq!(determine_stage(&s), PlanningStage::FirstYear);
            }
        }

        it "maps not-born to expecting" {
            let s = UserSituation {
                child_age: Some(ChildAge::NotBorn),
                ..situation(RelationshipStatus::Other)
            };
            assert_eq!(determine_stage(&s), PlanningStage::Expecting);
        }

        it "prefers pregnancy stage over child age" {
            let s = UserSituation {
                pregnancy_stage: Some(PregnancyStage::ThirdTrimester),
                child_age: Some(ChildAge::SixToTwelveMonths),
                ..situation(RelationshipStatus::Married)
            };
            assert_eq!(determine_stage(&s), PlanningStage::Expecting);
        }
    }

    describe "filter_checklist_items" {
        it "never lists paternity or custody items for married parents" {
            for s in all_situations().iter().filter(|s| s.is_married()) {
                let items = filter_checklist_items(&catalog.items, s);
                let ids = ids(&items);
                assert!(!ids.contains(&PATERNITY_ITEM_ID), "{:?}", s);
                assert!(!ids.contains(&JOINT_CUSTODY_ITEM_ID), "{:?}", s);
            }
        }

        it "always lists missing paternity and custody steps for unmarried parents" {
            let s = UserSituation {
                child_age: Some(ChildAge::Older),
                ..situation(RelationshipStatus::Unmarried)
            };
            let items = filter_checklist_items(&catalog.items, &s);
            let ids = ids(&items);
            assert_eq!(determine_stage(&s), PlanningStage::FirstYear);
            assert!(ids.contains(&PATERNITY_ITEM_ID));
            assert!(ids.contains(&JOINT_CUSTODY_ITEM_ID));
        }

        it "drops steps the parents already completed" {
            let s = UserSituation {
                pregnancy_stage: Some(PregnancyStage::FirstTrimester),
                has_paternity_certificate: true,
                ..situation(RelationshipStatus::Unmarried)
            };
            let items = filter_checklist_items(&catalog.items, &s);
            let ids = ids(&items);
            assert!(!ids.contains(&PATERNITY_ITEM_ID));
            assert!(ids.contains(&JOINT_CUSTODY_ITEM_ID));
        }

        it "falls back to stage matching for separated parents" {
            let expecting = UserSituation {
                pregnancy_stage: Some(PregnancyStage::SecondTrimester),
                ..situation(RelationshipStatus::Separated)
            };
            let items = filter_checklist_items(&catalog.items, &expecting);
            assert!(ids(&items).contains(&PATERNITY_ITEM_ID));

            let first_year = UserSituation {
                child_age: Some(ChildAge::SixToTwelveMonths),
                ..situation(RelationshipStatus::Separated)
            };
            let items = filter_checklist_items(&catalog.items, &first_year);
            assert!(!ids(&items).contains(&PATERNITY_ITEM_ID));
        }

        it "keeps only items of the computed stage otherwise" {
            let s = UserSituation {
                child_age: Some(ChildAge::ZeroToThreeMonths),
                ..situation(RelationshipStatus::Married)
            };
            let items = filter_checklist_items(&catalog.items, &s);
            assert!(!items.is_empty());
            assert!(items.iter().all(|i| i.stage == PlanningStage::AtBirth));
        }
    }

    describe "prioritize_items" {
        it "orders by urgency, then current stage, then title" {
            let s = UserSituation {
                relationship_stable: false,
                ..situation(RelationshipStatus::Unmarried)
            };
            let items = vec![
                item("c", "Zeta", PlanningStage::EarlyWarning, Urgency::Low),
                item("a", "Alpha", PlanningStage::Expecting, Urgency::Critical),
                item("b", "Beta", PlanningStage::EarlyWarning, Urgency::Critical),
                item("d", "Gamma", PlanningStage::EarlyWarning, Urgency::Critical),
                item("e", "Delta", PlanningStage::EarlyWarning, Urgency::High),
            ];

            let sorted = prioritize_items(items, &s);

            assert_eq!(ids(&sorted), vec!["b", "d", "a", "e", "c"]);
        }

        it "is non-decreasing in urgency for every generated checklist" {
            for s in all_situations() {
                let sorted = prioritize_items(filter_checklist_items(&catalog.items, &s), &s);
                for pair in sorted.windows(2) {
                    assert!(pair[0].urgency.rank() <= pair[1].urgency.rank());
                }
            }
        }

        it "keeps input order for full ties" {
            let s = situation(RelationshipStatus::Married);
            let items = vec![
                item("first", "Same", PlanningStage::Expecting, Urgency::Medium),
                item("second", "Same", PlanningStage::Expecting, Urgency::Medium),
            ];
            assert_eq!(ids(&prioritize_items(items, &s)), vec!["first", "second"]);
        }
    }

    describe "get_recommended_guides" {
        it "never returns more than five guides" {
            for s in all_situations() {
                assert!(get_recommended_guides(&catalog.guides, &s).len() <= MAX_RECOMMENDED_GUIDES);
            }
        }

        it "prepends the relationship guide before the unmarried guide" {
            let guides = vec![
                guide("ew-1", PlanningStage::EarlyWarning),
                guide(UNMARRIED_GUIDE_SLUG, PlanningStage::FirstYear),
                guide(RELATIONSHIP_TROUBLE_GUIDE_SLUG, PlanningStage::AtBirth),
                guide("ew-2", PlanningStage::EarlyWarning),
            ];
            let s = UserSituation {
                relationship_stable: false,
                ..situation(RelationshipStatus::Unmarried)
            };

            let slugs: Vec<String> = get_recommended_guides(&guides, &s)
                .into_iter()
                .map(|g| g.slug)
                .collect();

            assert_eq!(
                slugs,
                vec![RELATIONSHIP_TROUBLE_GUIDE_SLUG, UNMARRIED_GUIDE_SLUG, "ew-1", "ew-2"]
            );
        }

        it "does not duplicate a guide already selected by stage" {
            let reloaded = Catalog::seeded();
            let s = UserSituation {
                pregnancy_stage: Some(PregnancyStage::Planning),
                ..situation(RelationshipStatus::Unmarried)
            };
            let guides = get_recommended_guides(&reloaded.guides, &s);
            let count = guides.iter().filter(|g| g.slug == UNMARRIED_GUIDE_SLUG).count();
            assert_eq!(count, 1);
            assert_eq!(guides.len(), 5);
        }

        it "keeps the five first stage guides in catalog order" {
            let guides: Vec<PlanningGuide> = (0..7)
                .map(|i| guide(&format!("g{}", i), PlanningStage::FirstYear))
                .collect();
            let s = UserSituation {
                child_age: Some(ChildAge::Older),
                ..situation(RelationshipStatus::Married)
            };
            let slugs: Vec<String> = get_recommended_guides(&guides, &s)
                .into_iter()
                .map(|g| g.slug)
                .collect();
            assert_eq!(slugs, vec!["g0", "g1", "g2", "g3", "g4"]);
        }
    }

    describe "get_city_resources" {
        it "returns nothing without a city" {
            assert!(get_city_resources(&catalog.resources, None).is_none());
            assert!(get_city_resources(&catalog.resources, Some("   ")).is_none());
        }

        it "prefers an exact case-insensitive match" {
            let resources = vec![resource("Berlin-Mitte"), resource("Berlin")];
            let found = get_city_resources(&resources, Some("BERLIN")).unwrap();
            assert_eq!(found.city, "Berlin");
        }

        it "matches substrings in either direction" {
            let found = get_city_resources(&catalog.resources, Some("frankfurt")).unwrap();
            assert_eq!(found.city, "Frankfurt am Main");

            let found = get_city_resources(&catalog.resources, Some("Hamburg-Altona")).unwrap();
            assert_eq!(found.city, "Hamburg");
        }

        it "returns nothing for an unknown city" {
            assert!(get_city_resources(&catalog.resources, Some("Oslo")).is_none());
        }
    }

    describe "generate_next_steps" {
        it "leads with the top item and asks for paternity first" {
            let s = situation(RelationshipStatus::Unmarried);
            let items = vec![item("x", "Do this", PlanningStage::Expecting, Urgency::High)];
            let steps = generate_next_steps(&s, &items);

            assert_eq!(steps.len(), 3);
            assert_eq!(steps[0], "Start with: Do this");
            assert!(steps[1].contains("paternity"));
            assert!(steps[2].contains("Standesamt"));
        }

        it "asks for custody once paternity is done" {
            let s = UserSituation {
                has_paternity_certificate: true,
                city: Some("Berlin".to_string()),
                ..situation(RelationshipStatus::Unmarried)
            };
            let steps = generate_next_steps(&s, &[]);

            assert_eq!(steps.len(), 2);
            assert!(steps[0].contains("joint custody"));
            assert_eq!(steps[1], "Find local resources for Berlin");
        }

        it "adds documentation and legal advice together when unstable" {
            let s = UserSituation {
                relationship_stable: false,
                ..situation(RelationshipStatus::Married)
            };
            let steps = generate_next_steps(&s, &[]);

            assert_eq!(steps.len(), 3);
            assert!(steps[0].contains("Document"));
            assert!(steps[1].contains("legal"));
        }
    }

    describe "generate_personalized_checklist" {
        it "covers unmarried expecting parents" {
            let s = UserSituation {
                pregnancy_stage: Some(PregnancyStage::SecondTrimester),
                ..situation(RelationshipStatus::Unmarried)
            };
            let checklist = generate_personalized_checklist(&catalog, &s);
            let ids = ids(&checklist.priority_items);

            assert_eq!(checklist.stage, PlanningStage::Expecting);
            assert!(ids.contains(&PATERNITY_ITEM_ID));
            assert!(ids.contains(&JOINT_CUSTODY_ITEM_ID));
            assert_eq!(checklist.recommended_guides[0].slug, UNMARRIED_GUIDE_SLUG);
            assert_eq!(checklist.next_steps[0], "Start with: Acknowledge paternity");
            assert!(checklist.city_resources.is_none());
        }

        it "covers married parents in the first year" {
            let s = UserSituation {
                child_age: Some(ChildAge::SixToTwelveMonths),
                city: Some("hamburg".to_string()),
                ..situation(RelationshipStatus::Married)
            };
            let checklist = generate_personalized_checklist(&catalog, &s);
            let ids = ids(&checklist.priority_items);

            assert_eq!(checklist.stage, PlanningStage::FirstYear);
            assert!(!ids.contains(&PATERNITY_ITEM_ID));
            assert!(!ids.contains(&JOINT_CUSTODY_ITEM_ID));
            assert_eq!(checklist.city_resources.unwrap().city, "Hamburg");
            assert_eq!(checklist.next_steps.last().unwrap(), "Find local resources for hamburg");
        }

        it "surfaces early-warning items when the relationship is unstable" {
            let s = UserSituation {
                child_age: Some(ChildAge::OneToTwoYears),
                has_paternity_certificate: true,
                has_joint_custody: true,
                relationship_stable: false,
                ..situation(RelationshipStatus::Unmarried)
            };
            let checklist = ChecklistGenerator::new(std::sync::Arc::new(catalog.clone())).generate(&s);

            assert_eq!(checklist.stage, PlanningStage::EarlyWarning);
            assert!(!checklist.priority_items.is_empty());
            assert!(checklist
                .priority_items
                .iter()
                .all(|i| i.stage == PlanningStage::EarlyWarning));
            assert_eq!(checklist.priority_items[0].id, "document-agreements");
            assert_eq!(checklist.next_steps.len(), 4);
        }

        it "ranks current-stage items before forced items of equal urgency" {
            let s = UserSituation {
                relationship_stable: false,
                ..situation(RelationshipStatus::Unmarried)
            };
            let checklist = generate_personalized_checklist(&catalog, &s);
            let ids = ids(&checklist.priority_items);

            assert_eq!(&ids[..3], &["document-agreements", "legal-consultation", PATERNITY_ITEM_ID]);
        }
    }

    describe "situation deserialization" {
        it "accepts the wire format" {
            let json = r#"{
                "relationshipStatus": "unmarried",
                "pregnancyStage": "second-trimester",
                "childAge": "0-3-months",
                "hasPaternityCertificate": false,
                "hasJointCustody": false,
                "relationshipStable": true,
                "city": "Berlin"
            }"#;
            let s: UserSituation = serde_json::from_str(json).unwrap();
            assert_eq!(s.pregnancy_stage, Some(PregnancyStage::SecondTrimester));
            assert_eq!(s.child_age, Some(ChildAge::ZeroToThreeMonths));
        }

        it "rejects values outside the closed enums" {
            let json = r#"{"relationshipStatus": "engaged", "relationshipStable": true}"#;
            assert!(serde_json::from_str::<UserSituation>(json).is_err());
        }
    }
}
