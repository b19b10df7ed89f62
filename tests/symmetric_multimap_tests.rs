#[cfg(test)]
mod tests {
    use hashbrown::HashSet;
    use symmetric_multimap::SymmetricMultiMap;

    #[derive(PartialEq, Eq, Clone, Hash, Debug)]
    enum Node {
        Person(String),
        Group(u64),
    }

    fn construct_default_map() -> SymmetricMultiMap<Node> {
        (0..10)
            .map(|i| (Node::Person(i.to_string()), Node::Group(i % 2)))
            .collect()
    }

    #[test]
    fn construction_test() {
        let map: SymmetricMultiMap<u64> = SymmetricMultiMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 0);
        let map: SymmetricMultiMap<u64> = SymmetricMultiMap::with_capacity(100);
        assert!(map.capacity() >= 100);
        let mut map = construct_default_map();
        assert_eq!(map.len(), 12);
        let cap = map.capacity();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), cap);
    }

    #[test]
    fn symmetry_test() {
        let mut map = SymmetricMultiMap::new();
        map.set("a", "b");
        assert!(map.contains_key("a"));
        assert!(map.contains_key("b"));
        assert!(map.get("a").unwrap().contains("b"));
        assert!(map.get("b").unwrap().contains("a"));
        assert!(map.are_associated("a", "b"));
        assert!(map.are_associated("b", "a"));
    }

    #[test]
    fn insert_idempotence_test() {
        let mut map = SymmetricMultiMap::new();
        assert!(map.insert(1, 2));
        let before = map.clone();
        assert!(!map.insert(1, 2));
        assert!(!map.insert(2, 1));
        assert_eq!(map, before);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1).unwrap().len(), 1);
        assert_eq!(map.get(&2).unwrap().len(), 1);
    }

    #[test]
    fn size_accounting_test() {
        let mut map = SymmetricMultiMap::new();
        map.set("1", "x");
        assert_eq!(map.len(), 2);
        map.set("1", "y");
        assert_eq!(map.len(), 3);
        assert!(map.remove("1"));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn full_removal_test() {
        let mut map = SymmetricMultiMap::new();
        map.set('a', 'b');
        assert!(map.delete(&'a', None));
        assert!(!map.contains_key(&'a'));
        assert!(!map.contains_key(&'b'));
        assert!(map.is_empty());

        // Associates with other associations survive
        map.set('a', 'b').set('a', 'c').set('c', 'd');
        let removed = map.take(&'a').unwrap();
        assert_eq!(removed, ['b', 'c'].into_iter().collect::<HashSet<char>>());
        assert!(!map.contains_key(&'b'));
        assert!(map.contains_key(&'c'));
        assert_eq!(map.get(&'c').unwrap().len(), 1);
        assert!(map.are_associated(&'c', &'d'));
        assert!(!map.are_associated(&'c', &'a'));
    }

    #[test]
    fn pair_removal_test() {
        let mut map = SymmetricMultiMap::new();
        map.set('a', 'b').set('a', 'c');
        assert!(map.delete(&'a', Some(&'b')));
        assert!(map.contains_key(&'a'));
        let associates = map.get(&'a').unwrap();
        assert_eq!(associates.len(), 1);
        assert!(associates.contains(&'c'));
        assert!(!map.contains_key(&'b'));
        assert!(map.contains_key(&'c'));

        // Removing the last pair prunes both elements
        assert!(map.remove_pair(&'c', &'a'));
        assert!(map.is_empty());
    }

    #[test]
    fn missing_removal_test() {
        let mut map = SymmetricMultiMap::new();
        map.set(1, 2);
        assert!(!map.remove(&3));
        assert!(!map.remove_pair(&1, &3));
        assert!(!map.remove_pair(&3, &4));
        assert!(!map.delete(&5, None));
        assert!(map.take(&5).is_none());
        assert_eq!(map.len(), 2);
        assert!(map.are_associated(&1, &2));
    }

    #[test]
    fn insert_both_directions_test() {
        let mut map = SymmetricMultiMap::new();
        assert!(map.insert(1, 2));
        assert!(!map.insert(2, 1));
        assert!(map.insert(2, 2));
        assert!(map.insert(1, 3));
        assert!(map.remove_pair(&2, &1));
        assert!(map.insert(2, 1));
        assert!(map.remove(&3));
        assert!(map.insert(3, 1));
        assert!(map.are_associated(&1, &3));
        assert!(map.are_associated(&3, &1));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&2).unwrap().len(), 2);
    }

    #[test]
    fn edge_removal_test() {
        let mut map = SymmetricMultiMap::new();
        map.set(1, 2).set(3, 4);
        assert!(!map.remove_pair(&1, &3));
        assert!(!map.remove_pair(&1, &1));
        assert_eq!(map.len(), 4);

        map.set(5, 5).set(5, 6);
        assert!(map.remove(&5));
        assert!(!map.contains_key(&5));
        assert!(!map.contains_key(&6));

        let mut names: SymmetricMultiMap<String> = SymmetricMultiMap::new();
        names.set("a".to_string(), "b".to_string());
        assert!(names.delete("a", Some("b")));
        assert!(names.is_empty());
    }

    #[test]
    fn self_association_test() {
        let mut map = SymmetricMultiMap::new();
        map.set("a", "a");
        assert_eq!(map.len(), 1);
        let associates = map.get("a").unwrap();
        assert_eq!(associates.len(), 1);
        assert!(associates.contains("a"));
        assert!(!map.insert("a", "a"));

        map.set("a", "b");
        assert_eq!(map.len(), 2);
        assert!(map.remove_pair("a", "a"));
        assert_eq!(map.len(), 2);
        assert!(map.are_associated("a", "b"));

        map.set("a", "a");
        assert!(map.remove("a"));
        assert!(map.is_empty());
    }

    #[test]
    fn clear_test() {
        let mut map = construct_default_map();
        let elements: Vec<Node> = map.keys().cloned().collect();
        map.clear();
        assert_eq!(map.len(), 0);
        for element in elements {
            assert!(!map.contains_key(&element));
            assert!(map.get(&element).is_none());
        }
    }

    #[test]
    fn iter_test() {
        let map = construct_default_map();
        assert_eq!(map.iter().len(), map.len());
        for (element, associates) in map.iter() {
            for associate in associates {
                assert!(map.get(associate).unwrap().contains(element));
            }
            match element {
                Node::Person(_) => assert_eq!(associates.len(), 1),
                Node::Group(_) => assert_eq!(associates.len(), 5),
            }
        }
        let keys: Vec<&Node> = map.keys().collect();
        let values: Vec<usize> = map.values().map(|set| set.len()).collect();
        let entries: Vec<(&Node, usize)> = (&map).into_iter().map(|(k, v)| (k, v.len())).collect();
        assert_eq!(keys.len(), 12);
        for (i, (key, len)) in entries.into_iter().enumerate() {
            assert_eq!(keys[i], key);
            assert_eq!(values[i], len);
        }
    }

    #[test]
    fn for_each_test() {
        let map = construct_default_map();
        let mut count = 0;
        map.for_each(|associates, element, this| {
            assert_eq!(this.get(element).unwrap(), associates);
            count += 1;
        });
        assert_eq!(count, map.len());
    }

    #[test]
    fn pairs_test() {
        let mut map = SymmetricMultiMap::new();
        map.set(1, 2).set(2, 3).set(3, 1).set(4, 4);
        let pairs: Vec<(&u64, &u64)> = map.pairs().collect();
        assert_eq!(pairs.len(), 4);
        for (a, b) in pairs.iter() {
            assert!(map.are_associated(*a, *b));
        }
        assert!(pairs.contains(&(&4, &4)));
        let rebuilt: SymmetricMultiMap<u64> = map.pairs().map(|(a, b)| (*a, *b)).collect();
        assert_eq!(rebuilt, map);
    }

    #[test]
    fn extend_eq_test() {
        let mut map = SymmetricMultiMap::new();
        map.extend([(1, 2), (2, 3)]);
        let mut other = SymmetricMultiMap::new();
        other.set(3, 2).set(2, 1);
        assert_eq!(map, other);
        other.set(3, 4);
        assert_ne!(map, other);
    }

    #[test]
    fn debug_test() {
        let mut map = SymmetricMultiMap::new();
        map.set(1, 1);
        assert_eq!(format!("{map:?}"), "{1: ReadonlySet(1) {1}}");
    }
}
