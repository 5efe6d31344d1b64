mod interaction_properties;
